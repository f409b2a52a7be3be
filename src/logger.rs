//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::ArgMatches;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;

/// Log filter from `--loglevel`, `--verbose` or `RUST_LOG`, in this order
pub fn log_filter(args: &ArgMatches<'_>, rust_log_env: Option<String>) -> String {
    match (args.value_of("loglevel"), args.is_present("verbose"), rust_log_env) {
        (Some(loglevel), _, _) => loglevel.to_string(),
        (None, true, _) => "debug".to_string(),
        (None, false, Some(rust_log)) => rust_log,
        (None, false, None) => "info".to_string(),
    }
}

pub fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });
    builder.parse_filters(&log_filter(args, env::var("RUST_LOG").ok()));
    builder.init();
}
