use anyhow::Context;
use clap::Parser;
use examcard_converter::utils::error::ErrorCategory;
use examcard_converter::utils::{logger, validation::Validate};
use examcard_converter::{CliArgs, ConversionEngine, ConverterError, ExamCardPipeline};

fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting examcard-converter");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 失敗只在主控台回報，結束碼維持預設
    if let Err(e) = run(&args) {
        report_failure(&e);
    }
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let file_config = args
        .load_file_config()
        .context("Failed to load configuration file")?;

    let source_dir = {
        let stdin = std::io::stdin();
        args.resolve_source(&file_config, stdin.lock(), std::io::stdout())
            .context("Failed to resolve the source folder")?
    };

    let config = args.build_config(source_dir, &file_config);
    config
        .validate()
        .with_context(|| format!("Invalid settings for {}", config.source_dir.display()))?;
    tracing::info!(
        "🎯 Target profile {} for <{}>",
        config.target_profile,
        config.slice_mode_tag
    );

    let mut engine = ConversionEngine::new(ExamCardPipeline::new(config));
    let summary = engine.run().context("ExamCard conversion aborted")?;

    if summary.files.is_empty() {
        println!("\nNo exam cards found in {}", summary.output_dir.display());
    } else {
        println!("\nConversion completed successfully.");
        println!("\nConverted examcards kept at {}", summary.output_dir.display());
    }

    Ok(())
}

fn report_failure(err: &anyhow::Error) {
    let category = ErrorCategory::of(err);
    tracing::error!("❌ {:#} (Category: {:?})", err, category);

    let Some(e) = err.downcast_ref::<ConverterError>() else {
        println!("\n{:?}", err);
        return;
    };
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    match category {
        // 驗證失敗只需要提示使用者，不印錯誤鏈
        ErrorCategory::Validation => {
            println!("{}", e.user_friendly_message());
            println!("{}", e.recovery_suggestion());
        }
        _ => {
            println!("\n{}", e.user_friendly_message());
            println!("{:?}", err);
        }
    }
}
