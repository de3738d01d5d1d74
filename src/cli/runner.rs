use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use nlcdpad::{FusionParams, RemapTable, fuse_files, load_params};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Merge the optional config file with command-line overrides
pub fn build_params(args: &CliArgs) -> Result<FusionParams, AppError> {
    let mut params = match &args.config {
        Some(path) => load_params(path)?,
        None => FusionParams::default(),
    };

    if let Some(p) = &args.status {
        params.status = Some(p.clone());
    }
    if let Some(p) = &args.land_cover {
        params.land_cover = Some(p.clone());
    }
    if let Some(p) = &args.output {
        params.output = Some(p.clone());
    }
    if let Some(n) = args.status_band {
        params.status_band = n;
    }
    if let Some(field) = &args.status_field {
        params.status_field = Some(field.clone());
    }
    if let Some(n) = args.land_cover_band {
        params.land_cover_band = n;
    }
    if !args.remap.is_empty() {
        let mut pairs = Vec::with_capacity(args.remap.len());
        for pair in &args.remap {
            let parsed = RemapTable::parse_pair(pair).map_err(|_| AppError::InvalidRemap {
                pair: pair.clone(),
            })?;
            pairs.push(parsed);
        }
        params.remap = RemapTable::new(pairs)?;
    }
    if let Some(policy) = args.unmapped {
        params.unmapped = policy;
    }
    if let Some(suffix) = &args.suffix {
        params.suffix = suffix.clone();
    }
    if let Some(format) = args.format {
        params.format = format;
    }
    if let Some(data_type) = args.data_type {
        params.data_type = data_type;
    }
    if args.nodata.is_some() {
        params.nodata = args.nodata;
    }
    if !args.creation_options.is_empty() {
        params.creation_options = Some(args.creation_options.clone());
    }
    if args.no_overwrite {
        params.overwrite = false;
    }
    if args.sidecar {
        params.sidecar = true;
    }

    for index in [params.status_band, params.land_cover_band] {
        if index == 0 {
            return Err(AppError::ZeroBand { index });
        }
    }
    if params.status.is_none() {
        return Err(AppError::MissingArgument {
            arg: "--status".to_string(),
        });
    }
    if params.land_cover.is_none() {
        return Err(AppError::MissingArgument {
            arg: "--land-cover".to_string(),
        });
    }

    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let start = Instant::now();
    let params = build_params(&args)?;

    info!("Status raster: {:?}", params.status);
    info!("Land-cover raster: {:?}", params.land_cover);

    let report = fuse_files(&params)?;

    info!(
        "Successfully wrote {:?} (combined={}, filled={}, nodata={})",
        report.output, report.stats.combined, report.stats.filled, report.stats.nodata
    );
    if let Some(sidecar) = &report.sidecar {
        info!("Metadata sidecar: {:?}", sidecar);
    }

    let elapsed_minutes = start.elapsed().as_secs_f64() / 60.0;
    println!("Total time for completion: {:.4} minutes", elapsed_minutes);

    Ok(())
}
