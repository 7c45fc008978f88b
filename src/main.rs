use clap::Parser;
use capsule_form::utils::error::{CapsuleError, ErrorSeverity};
use capsule_form::utils::{logger, validation::Validate};
use capsule_form::{CliConfig, FormSession, SubmissionOutcome};

fn exit_code(error: &CapsuleError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,      // rejected by the service, adjust and resubmit
        ErrorSeverity::Medium => 2,   // retryable
        ErrorSeverity::High => 1,     // bad input or configuration
        ErrorSeverity::Critical => 3, // system error
    }
}

fn fail(error: &CapsuleError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(error));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting capsule-form");
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    if let Err(e) = settings.validate() {
        fail(&e);
    }
    tracing::info!("🔧 Wardrobe service: {}", settings.server);

    let mut session = match FormSession::new(&settings) {
        Ok(session) => session,
        Err(e) => fail(&e),
    };
    let pending = match session.prepare(settings.updates.clone()) {
        Ok(pending) => pending,
        Err(e) => {
            print!("{}", session.page());
            fail(&e)
        }
    };

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no request will be sent");
        print!("{}", session.page());
        println!("Token: {}", session.token()?);
        println!("Share link: {}", session.share_link()?);
        return Ok(());
    }

    if !pending {
        print!("{}", session.page());
        println!("Nothing to submit: pass a --link or change a field.");
        return Ok(());
    }

    let outcome = session.submit().await;
    print!("{}", session.page());

    match outcome {
        Some(SubmissionOutcome::Delivered { token }) => {
            tracing::info!("✅ Wardrobe received for {}", token);
            println!("🔗 Share link: {}", session.location());
        }
        Some(SubmissionOutcome::Rejected { message }) => {
            let rejection = CapsuleError::ServerError { message };
            tracing::warn!("{}", rejection);
            eprintln!("💡 {}", rejection.recovery_suggestion());
            std::process::exit(exit_code(&rejection));
        }
        Some(SubmissionOutcome::Failed(e)) => fail(&e),
        None => {}
    }

    Ok(())
}
