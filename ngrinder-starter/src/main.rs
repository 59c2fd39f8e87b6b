// Copyright 2026 nGrinder Team
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

//! nGrinder - controller launcher entry point.

use ngrinder_starter::{RunOutcome, EXIT_FATAL, EXIT_OK};
use tracing::error;

#[tokio::main]
async fn main() {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ngrinder=info,ngrinder_starter=info,ngrinder_core=info,tower_http=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let code = match ngrinder_starter::run(&tokens).await {
        Ok(RunOutcome::Help(usage)) => {
            println!("{usage}");
            EXIT_OK
        }
        Ok(RunOutcome::Shutdown) => EXIT_OK,
        Err(err) => {
            error!("Startup failed: {}", err);
            eprintln!("{err}");
            if let Some(usage) = err.usage() {
                eprintln!("{usage}");
            }
            EXIT_FATAL
        }
    };

    // Exit here so a pending read on standard input cannot hold the runtime open.
    std::process::exit(code);
}
