// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions implemented by component authors.

pub mod component;

pub use component::{Component, ComponentState};
