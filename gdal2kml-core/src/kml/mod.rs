//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod document;

pub use self::document::{escape, OverlayDocument, OverlayDocumentBuilder, OverlayEntry};

#[cfg(test)]
mod document_test;
