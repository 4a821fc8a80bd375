// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Componentry integration tests.
//!
//! Provides descriptor tree fixtures, mock components, and an instrumented
//! module loader for fast, deterministic tests against a real filesystem.
//!
//! # Components
//!
//! - [`ComponentTree`] - Temporary directory of descriptors and module sources
//! - [`MockComponent`] - Component recording its lifecycle calls
//! - [`RecordingLoader`] - Module loader capturing load order

pub mod fixtures;
pub mod mock_component;
pub mod recording;

pub use fixtures::{ComponentTree, DescriptorSpec};
pub use mock_component::{MockComponent, failing_factory, mock_factory};
pub use recording::RecordingLoader;
