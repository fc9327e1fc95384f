// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::sync::Arc;
use toaster::config::{self, MIN_STACKING};
use toaster::notifications::{NotificationId, Notifier};
use toaster::visual::{HeadlessRenderer, SurfaceMount};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
toaster - queued toast notifications demo

USAGE:
  toaster [OPTIONS]

OPTIONS:
  --config <PATH>         Load notifier settings from PATH
  --count <N>             Number of notifications to show [default: 5]
  --stacking <N|false>    Override the stacking limit
  -h, --help              Print this help
";

const DEFAULT_COUNT: usize = 5;
const TOAST_HEIGHT: f32 = 48.0;
const KINDS: [&str; 4] = ["info", "success", "warning", "error"];

fn parse_stacking(raw: &str) -> Result<Option<usize>, String> {
    if raw.eq_ignore_ascii_case("false") {
        return Ok(None);
    }
    let limit: usize = raw
        .parse()
        .map_err(|_| format!("expected a number or `false`, got `{}`", raw))?;
    Ok(Some(limit).filter(|limit| *limit >= MIN_STACKING))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;
    let count: usize = args.opt_value_from_str("--count")?.unwrap_or(DEFAULT_COUNT);
    let stacking = args.opt_value_from_fn("--stacking", parse_stacking)?;
    let unused = args.finish();
    if !unused.is_empty() {
        tracing::warn!(?unused, "Ignoring unknown arguments");
    }

    let mut config = match config_path {
        Some(path) => config::load_from_path(&path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                tracing::warn!("{}", warning);
            }
            config
        }
    };
    if let Some(stacking) = stacking {
        config.behaviour.stacking = stacking;
    }
    let config = Arc::new(config);

    let renderer = Arc::new(HeadlessRenderer::new(TOAST_HEIGHT));
    let mount = SurfaceMount::new(Arc::clone(&renderer), Arc::clone(&config));
    let (notifier, mut subscriptions) = Notifier::spawn(config, Arc::new(mount));

    let mut active = subscriptions.active.clone();
    tokio::spawn(async move {
        while active.changed().await.is_ok() {
            let ids: Vec<String> = active
                .borrow_and_update()
                .iter()
                .map(NotificationId::to_string)
                .collect();
            tracing::info!(?ids, "Active notifications changed");
        }
    });

    for index in 0..count {
        let kind = KINDS[index % KINDS.len()];
        notifier.notify(kind, format!("Notification #{}", index + 1), None);
    }
    notifier.idle().await;

    let newest = subscriptions.active.borrow().last().cloned();
    if let Some(visual) = newest.and_then(|id| renderer.visual(&id)) {
        visual.on_custom_action("undo", Some(visual.id().to_string()));
        if let Some(event) = subscriptions.custom_actions.recv().await {
            tracing::info!(
                id = %event.notification_id,
                name = %event.name,
                payload = ?event.payload,
                "Custom action received"
            );
        }
        notifier.idle().await;
    }

    notifier.hide_all();
    notifier.idle().await;
    tracing::info!(live = renderer.live(), "All notifications hidden");

    Ok(())
}
