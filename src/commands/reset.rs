// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::store::{Action, Store};
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        return Err(anyhow::anyhow!(
            "This erases every transaction, budget, fixed expense and setting. Re-run with --yes"
        ));
    }
    store.dispatch(Action::ResetAll);
    println!("All data cleared");
    Ok(())
}
