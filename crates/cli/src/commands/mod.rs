// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod harvest;
pub mod mock_bursts;
pub mod render;
pub mod run;
pub mod status;
