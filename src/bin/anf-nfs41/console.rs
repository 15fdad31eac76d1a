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

//! Console output helpers.

use std::fmt::Display;

use chrono::Local;

const HEADER_WIDTH: usize = 80;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Print the application banner.
pub fn header(title: &str) {
    let rule = "-".repeat(HEADER_WIDTH);
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
}

/// Print a progress message.
pub fn message<S: Display>(text: S) {
    println!("[{}] {}", timestamp(), text);
}

/// Print an error message.
pub fn error<S: Display>(text: S) {
    eprintln!("[{}] ERROR: {}", timestamp(), text);
}
