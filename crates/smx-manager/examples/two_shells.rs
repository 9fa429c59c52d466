// ABOUTME: Minimal demo: two shells tiled side by side, output mirrored to stdout.
// ABOUTME: Run with `cargo run -p smx-manager --example two_shells`.

use std::io::Write;
use std::time::{Duration, Instant};

use smx_manager::{LayoutKind, PaneManager, Rect, SpawnConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut manager = PaneManager::new();
    manager.set_terminal_size(Rect::new(0, 0, 80, 24))?;

    let left = manager.spawn(SpawnConfig::new())?;
    let right = manager.spawn(SpawnConfig::new())?;
    manager.auto_arrange(LayoutKind::Auto)?;

    for (id, rect) in manager.areas() {
        tracing::info!("pane {} occupies {:?}", id, rect);
    }

    manager.send_input(left, b"echo hello from the left pane\n")?;
    manager.send_input(right, b"echo hello from the right pane\n")?;

    let deadline = Instant::now() + Duration::from_secs(2);
    let mut stdout = std::io::stdout();
    while Instant::now() < deadline {
        for id in [left, right] {
            for chunk in manager.poll_output(id)? {
                stdout.write_all(&chunk)?;
            }
        }
        for event in manager.poll_events() {
            tracing::info!("pane event: {:?}", event);
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    stdout.flush()?;

    manager.shutdown();
    Ok(())
}
