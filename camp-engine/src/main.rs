use camp_engine::console::{self, ConsoleCommand};
use camp_engine::core::{BackgroundTasks, TaskKind};
use camp_engine::persistence::{SaveWorker, load_or_default, save_snapshot, store_from_config};
use camp_engine::rooms::AutoCheckoutSweeper;
use camp_engine::{Clock, Resort, print_banner, setup_environment};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// 关机时每个后台任务的等待上限
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 工作目录, 日志)
    let config = setup_environment()?;
    print_banner();
    tracing::info!("Camp engine starting...");

    // 2. 载入状态
    let store = store_from_config(&config)?;
    let state = load_or_default(store.as_ref(), &config.basket_name, config.default_blanket_stock).await;
    let resort = Resort::new(state, Clock::Business(config.timezone));

    // 3. 后台任务
    let mut tasks = BackgroundTasks::new();
    let sweeper = AutoCheckoutSweeper::new(resort.clone(), &config, tasks.shutdown_token());
    tasks.spawn("auto_checkout", TaskKind::Periodic, sweeper.run());
    let saver = SaveWorker::new(resort.clone(), store.clone(), &config, tasks.shutdown_token());
    tasks.spawn("save_worker", TaskKind::Worker, saver.run());
    tasks.log_summary();

    // 4. 控制台
    println!("{}", console::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Received Ctrl+C");
                break;
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Console read failed");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match ConsoleCommand::parse(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => println!("{}", console::execute(&resort, command, config.checkout_hour)),
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    // 5. 关机：停止后台任务（存档 worker 会写出未存的变更）
    tasks.shutdown(SHUTDOWN_GRACE).await;
    if let Err(e) = save_snapshot(&resort, store.as_ref(), &config.basket_name).await {
        tracing::error!(error = %e, "Final snapshot save failed");
    }
    tracing::info!("Camp engine stopped");
    Ok(())
}
