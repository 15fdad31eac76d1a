// Copyright 2026 The anf contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Create a NetApp account, a capacity pool and an NFSv4.1 volume.
//!
//! Usage: `anf-nfs41 [CONFIG.yaml]`. Credentials come from the SDK
//! authentication file named by `AZURE_AUTH_LOCATION`.

#[macro_use]
extern crate log;

use std::env;
use std::process;

use anf::config::Config;
use anf::identity::ServicePrincipal;
use anf::workflow;

mod console;

async fn run() -> anf::Result<()> {
    let config = Config::load(env::args_os().nth(1))?;
    config.validate()?;
    debug!("Using configuration {:?}", config);

    console::message("Authenticating...");
    let auth = ServicePrincipal::from_env()?;

    console::message("Instantiating a new NetApp Files management client...");
    let cloud = workflow::connect(&config, auth)?;
    console::message(format!("\tApi Version: {}", cloud.api_version()));

    let outcome = workflow::provision(&cloud, &config, &config.wait_options(), |msg| {
        console::message(msg)
    })
    .await?;
    debug!("Provisioning finished with {:?}", outcome);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    console::header("NetApp Files NFSv4.1 provisioning");

    match run().await {
        Ok(()) => console::message("Sample application successfully completed execution."),
        Err(err) => {
            console::error(err);
            process::exit(1);
        }
    }
}
