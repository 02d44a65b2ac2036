// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod exporter;
pub mod fixed;
pub mod months;
pub mod quick;
pub mod reset;
pub mod settings;
pub mod summary;
pub mod transactions;
