//! label-optim - CLI for the label press cylinder and laize optimizer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use label_optim_rs::calc::validate_meterage_inputs;
use label_optim_rs::config::{is_known_machine, LaizeConfig, ALL_MACHINES_KEY};
use label_optim_rs::report::format_decimal_fr;
use label_optim_rs::validation::{parse_non_negative_f64, parse_positive_f64};
use label_optim_rs::{
    optimize_laize_with, render_optimal, render_report, render_selection, run_study_with,
    select_cylinder, validate_catalog, CylinderCatalog, MachineFilter, ReportState, Selection,
    StudyRequest, DEFAULT_MAX_LAIZE_MM,
};

/// Pick print cylinders and web widths for rotary label presses.
#[derive(Parser, Debug)]
#[command(name = "label-optim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cylinder catalog JSON file (defaults to the built-in catalog)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Machine key (bobst1, bobst2, indien) or "all"
    #[arg(short, long, global = true, default_value = ALL_MACHINES_KEY)]
    machine: String,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank the cylinders for a label width and recommend one
    Select {
        /// Label width along the cylinder circumference (mm)
        width: String,
    },
    /// Compute the widest lane layout for a label length
    Laize {
        /// Label length across the web (mm)
        length: String,

        #[command(flatten)]
        laize: LaizeOptions,
    },
    /// Compute the web length needed for a quantity of labels
    Meterage {
        /// Number of labels to print
        quantity: String,

        /// Labels printed per cylinder revolution
        #[arg(long)]
        labels_per_revolution: String,

        /// Cylinder circumference (mm)
        #[arg(long)]
        circumference: String,
    },
    /// Inspect the cylinder catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run a full production study and print the report
    Study {
        /// Label width (mm)
        #[arg(long)]
        width: String,

        /// Label length (mm)
        #[arg(long)]
        length: Option<String>,

        #[command(flatten)]
        laize: LaizeOptions,

        /// Number of labels to print
        #[arg(long)]
        quantity: Option<String>,

        /// Study name printed in the report header
        #[arg(long)]
        name: Option<String>,

        /// Retain this cylinder instead of the recommended one
        #[arg(long)]
        cylinder: Option<String>,
    },
}

/// Web width and lane spacing constraints.
#[derive(clap::Args, Debug)]
struct LaizeOptions {
    /// Maximum web width (mm)
    #[arg(long, default_value_t = DEFAULT_MAX_LAIZE_MM.to_string())]
    max_width: String,

    /// Gap between lanes (mm)
    #[arg(long)]
    gap: Option<String>,

    /// Minimum margin on each side of the web (mm)
    #[arg(long)]
    min_margin: Option<String>,

    /// Maximum margin on each side of the web (mm)
    #[arg(long)]
    max_margin: Option<String>,
}

impl LaizeOptions {
    fn config(&self) -> Result<LaizeConfig> {
        let mut config = LaizeConfig::default();
        if let Some(raw) = &self.gap {
            config.gap = parse_non_negative_f64("gap", raw)?;
        }
        if let Some(raw) = &self.min_margin {
            config.min_side_margin = parse_positive_f64("min_margin", raw)?;
        }
        if let Some(raw) = &self.max_margin {
            config.max_side_margin = parse_positive_f64("max_margin", raw)?;
        }
        config.check()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List the cylinders available on the selected machine
    List,
    /// Validate the catalog
    Check,
}

/// JSON shape of the `study` command.
#[derive(Serialize)]
struct StudyOutput<'a> {
    selection: &'a Selection,
    report: &'a ReportState,
    generated_at: &'a str,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let machine = args.machine.trim().to_lowercase();
    if machine != ALL_MACHINES_KEY && !is_known_machine(&machine) {
        warn!("Unknown machine '{}', no cylinder will match", machine);
    }
    let filter = MachineFilter::parse(&machine);

    let catalog = load_catalog(args.catalog.as_ref())?;

    match args.command {
        Command::Select { width } => {
            let label_width = parse_positive_f64("label_width", &width)?;
            let candidates = catalog.filter_by_machine(&filter);
            info!(
                "Ranking {} cylinder(s) for {} mm labels on {}",
                candidates.len(),
                label_width,
                filter.display_name()
            );
            let selection = select_cylinder(label_width, &candidates)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&selection)?);
                return Ok(());
            }
            print!("{}", render_optimal(selection.optimal.as_ref()));
            println!();
            print!("{}", render_selection(&selection, None));
        }
        Command::Laize { length, laize } => {
            let config = laize.config()?;
            let label_length = parse_positive_f64("label_length", &length)?;
            let max_width = parse_positive_f64("max_width", &laize.max_width)?;
            let layout = optimize_laize_with(&config, label_length, max_width)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
                return Ok(());
            }
            match layout {
                Some(layout) => {
                    println!("Laize Optimale : {} mm", layout.total_width);
                    println!("Nombre de Poses : {}", layout.lanes);
                    println!("Marge Latérale : {} mm", format_decimal_fr(layout.side_margin, 1));
                }
                None => println!(
                    "Aucune configuration trouvée pour une laize maximale de {} mm.",
                    max_width
                ),
            }
        }
        Command::Meterage {
            quantity,
            labels_per_revolution,
            circumference,
        } => {
            let meterage =
                validate_meterage_inputs(&quantity, &labels_per_revolution, &circumference)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&meterage)?);
                return Ok(());
            }
            println!(
                "Métrage Linéaire : {} m",
                format_decimal_fr(meterage.length_m, 2)
            );
            println!(
                "Soit {} mm pour {} tours de cylindre",
                format_decimal_fr(meterage.length_mm, 0),
                format_decimal_fr(meterage.revolutions, 1)
            );
        }
        Command::Catalog { command } => match command {
            CatalogCommand::List => {
                let cylinders = catalog.filter_by_machine(&filter);
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&cylinders)?);
                    return Ok(());
                }
                println!("{} ({} cylindre(s))", filter.display_name(), cylinders.len());
                for cyl in &cylinders {
                    let machines: Vec<&str> = cyl.machines.iter().map(String::as_str).collect();
                    println!(
                        "  {:<6} {:>8.2} mm  Z{:<4} {}  [{}]",
                        cyl.reference_code,
                        cyl.circumference,
                        cyl.tooth_count,
                        cyl.name,
                        machines.join(", ")
                    );
                }
            }
            CatalogCommand::Check => {
                let validation = validate_catalog(catalog.as_slice());

                for warning in &validation.warnings {
                    warn!("{}", warning);
                }

                for err in &validation.errors {
                    error!("{}", err);
                }

                if !validation.passed {
                    anyhow::bail!("Catalog validation failed");
                }

                info!("Catalog valid: {} cylinder(s)", catalog.len());
            }
        },
        Command::Study {
            width,
            length,
            laize,
            quantity,
            name,
            cylinder,
        } => {
            let request = StudyRequest {
                study_name: name.unwrap_or_default(),
                label_width: width,
                label_length: length.unwrap_or_default(),
                max_width: laize.max_width.clone(),
                machine,
                quantity: quantity.unwrap_or_default(),
            };

            let mut workbench =
                run_study_with(catalog, &request, laize.config()?).context("Study failed")?;
            if let Some(name) = cylinder {
                workbench
                    .select_cylinder(&name)
                    .with_context(|| format!("Cannot retain cylinder '{}'", name))?;
            }

            let generated_at = chrono::Local::now()
                .format("%d/%m/%Y %H:%M:%S")
                .to_string();

            if args.json {
                let output = StudyOutput {
                    selection: workbench.selection(),
                    report: workbench.report(),
                    generated_at: &generated_at,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            print!("{}", render_optimal(workbench.selection().optimal.as_ref()));
            println!();
            print!(
                "{}",
                render_selection(
                    workbench.selection(),
                    workbench.active_cylinder().map(|f| f.name.as_str())
                )
            );
            println!();
            print!("{}", render_report(workbench.report(), Some(&generated_at)));
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<CylinderCatalog> {
    match path {
        Some(path) => {
            info!("Loading catalog: {}", path.display());
            CylinderCatalog::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        None => CylinderCatalog::seed().context("Failed to load the built-in catalog"),
    }
}
