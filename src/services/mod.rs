// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod augment;
pub mod enumerator;
pub mod git;
pub mod policy;
pub mod sizes;
pub mod types;
