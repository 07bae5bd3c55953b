// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Brainwiki: the linking engine of a personal wiki.
//!
//! Notes and folders live in a [`model::Vault`]. Their titles and names form a term index that
//! the segmenter uses to turn plain note bodies into cross-linked text, and a navigation stack
//! remembers the path a reader took through those links. [`wiki::Wiki`] ties the pieces
//! together behind a single mutation façade.

pub mod config;
pub mod define;
pub mod index;
pub mod model;
pub mod nav;
pub mod query;
pub mod segment;
pub mod store;
pub mod wiki;
