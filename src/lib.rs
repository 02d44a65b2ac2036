// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calculations;
pub mod cli;
pub mod commands;
pub mod db;
pub mod export;
pub mod models;
pub mod store;
pub mod utils;
pub mod validation;
