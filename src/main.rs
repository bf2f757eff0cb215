use anyhow::Context;
use clap::Parser;
use domain_dash::app::command::{Command, HELP};
use domain_dash::app::{LoadState, Step};
use domain_dash::utils::{logger, validation::Validate};
use domain_dash::{
    App, AssetSource, CliConfig, Column, CsvLoader, DashError, OutputFormat, TracingNotifier,
};
use std::io::{BufRead, Write};

type DashApp = App<AssetSource, TracingNotifier>;

fn fail(e: &DashError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    if settings.log_json {
        logger::init_json_logger(config.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::info!("🚀 Starting domain-dash");
    tracing::debug!("CLI config: {:?}", config);
    tracing::debug!("Resolved settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = config.validate().and_then(|_| settings.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    let loader = CsvLoader::new(settings.source.clone().into_source());
    let mut app: DashApp = App::new(loader, settings.window, TracingNotifier::new(!config.json));

    if config.interactive {
        return run_interactive(&mut app, &config, format).await;
    }

    run_once(&mut app, &config, format).await
}

async fn run_once(app: &mut DashApp, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let username = config.username.as_deref().unwrap_or_default();
    let password = config.password.as_deref().unwrap_or_default();
    if let Err(e) = app.login(username, password).await {
        fail(&e);
    }

    let dashboard = match app.dashboard_mut() {
        Ok(dashboard) => dashboard,
        Err(e) => fail(&e),
    };

    if let LoadState::Failed(category) = dashboard.load_state() {
        if let Some(message) = dashboard.status_message() {
            eprintln!("{}", message);
        }
        tracing::error!("❌ Load failed ({:?})", category);
        std::process::exit(1);
    }

    dashboard.set_search(config.search.clone());
    for click in &config.sort_clicks {
        // 已在 validate() 檢查過欄位名稱
        if let Ok(column) = click.parse::<Column>() {
            dashboard.click_header(column);
        }
    }
    dashboard.scroll_to(config.scroll);

    match app.render(format) {
        Ok(output) => println!("{}", output),
        Err(e) => fail(&e),
    }
    Ok(())
}

async fn run_interactive(
    app: &mut DashApp,
    config: &CliConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("{}", HELP);

    // 命令列有帳密時直接登入
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        match app.login(username, password).await {
            Ok(_) => println!("{}", app.render(format)?),
            Err(e) if e.is_recoverable() => eprintln!("❌ {}", e.user_friendly_message()),
            Err(e) => fail(&e),
        }
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("{}> ", app.route().path());
        stdout.flush().context("flushing prompt")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("reading command from stdin")?
            == 0
        {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("❌ {}", e);
                continue;
            }
        };

        match app.execute(command, format).await {
            Ok(Step::Quit) => break,
            Ok(Step::Continue(Some(output))) => println!("{}", output),
            Ok(Step::Continue(None)) => {}
            Err(e) if e.is_recoverable() => eprintln!("❌ {}", e.user_friendly_message()),
            Err(e) => fail(&e),
        }
    }

    tracing::info!("👋 Bye");
    Ok(())
}
