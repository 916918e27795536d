// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nodemap CLI entrypoint.
//!
//! Opens a document file (created on first save when missing) in the terminal canvas.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use log::{info, LevelFilter, Log, Metadata, Record};

use nodemap::config::EditorConfig;
use nodemap::ops::GraphModel;
use nodemap::store::{DocumentFile, WriteDurability};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file>] [--config <file>] [--durable-writes] [--log-file <file>]\n  \
         {program} --demo [--config <file>] [--log-file <file>]\n\n\
         <file> is a nodemap JSON document or a legacy project file; it is created on first \
         save.\n--demo opens a built-in roadmap that is not saved anywhere.\n\
         --config reads editor settings (snapping, node sizes, zoom limits) from JSON.\n\
         --durable-writes syncs saves to disk (fsync/sync where supported).\n\
         --log-file appends debug logs to the given file."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    file: Option<String>,
    config: Option<String>,
    log_file: Option<String>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    if options.demo && (options.file.is_some() || options.durable_writes) {
        return Err(());
    }

    Ok(options)
}

/// Appends log records to a file; the terminal belongs to the UI while it runs.
struct FileLogger {
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger = FileLogger {
        file: Mutex::new(file),
    };
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "nodemap".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(path) = &options.log_file {
            init_logging(path)?;
        }

        let config = match &options.config {
            Some(path) => EditorConfig::from_json_file(path)?,
            None => EditorConfig::default(),
        };
        let sizing = config.node_sizing();

        let (document, file) = if options.demo {
            (nodemap::tui::demo_document(), None)
        } else {
            let path = options.file.unwrap_or_else(|| "nodemap.json".to_owned());
            let durability = if options.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
            let file = DocumentFile::new(path)
                .with_durability(durability)
                .with_sizing(sizing);
            (file.load_or_new()?, Some(file))
        };

        info!(
            "starting with {} node(s), {} connection(s)",
            document.node_count(),
            document.connection_count()
        );
        let model = GraphModel::from_document(document, sizing);
        nodemap::tui::run(model, config.interaction(), file)
    })();

    if let Err(err) = result {
        eprintln!("nodemap: {err}");
        std::process::exit(1);
    }
}
