use std::path::PathBuf;
use std::sync::Arc;

use alumhub::{
    init_logging, AppContext, BookmarkChanged, BusEvent, Config, StackRouter, UnreadCountChanged,
    BUILD_DATE, VERSION,
};

/// Walks through the two flows the plumbing exists for: a bookmark toggled
/// on one screen showing up on another, and a double tap that must not open
/// the same discussion twice.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)?;

    // Initialize logging
    init_logging(&config.logging)?;
    tracing::info!("AlumHub {} (built {})", VERSION, BUILD_DATE);

    let router = Arc::new(StackRouter::new("/home"));
    let app = AppContext::from_shared(config, router.clone());

    // Saved-items screen mirrors bookmark changes made elsewhere
    let saved_screen = app.bus.subscribe_event(|change: BookmarkChanged| {
        tracing::info!(
            "Saved items: discussion {} is now {}",
            change.discussion_id,
            if change.saved { "saved" } else { "unsaved" }
        );
    })?;

    // The tab bar badge listens from an async task
    let (badge, mut unread) = app.bus.subscribe_channel(UnreadCountChanged::NAME)?;
    let badge_task = tokio::spawn(async move {
        while let Some(payload) = unread.recv().await {
            match alumhub_core::event_bus::decode::<UnreadCountChanged>(&payload) {
                Ok(update) => tracing::info!("Badge shows {} unread", update.count),
                Err(err) => tracing::warn!("{}", err),
            }
        }
    });

    open_and_bookmark(&app, "disc-1")?;
    app.bus.emit_event(&UnreadCountChanged { count: 3 })?;

    tokio::time::sleep(app.navigation.config().debounce).await;
    app.navigation.back()?;
    tracing::info!("Screen stack: {:?}", router.stack());

    // Unmount
    saved_screen.unsubscribe();
    badge.unsubscribe();
    drop(app);
    badge_task.await?;

    Ok(())
}

/// Forum screen: double tap on a discussion row, then bookmark it
fn open_and_bookmark(app: &AppContext, discussion_id: &str) -> alumhub::Result<()> {
    let target = format!("/forum/{discussion_id}");
    for _ in 0..2 {
        let outcome = app.navigation.push(&target)?;
        tracing::info!("Tap on {}: {:?}", discussion_id, outcome);
    }
    app.bus.emit_event(&BookmarkChanged {
        discussion_id: discussion_id.to_string(),
        saved: true,
    })?;
    Ok(())
}
