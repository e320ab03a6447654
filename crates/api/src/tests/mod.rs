// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod authorization_tests;
mod entry_tests;
mod helpers;
mod workflow_tests;
