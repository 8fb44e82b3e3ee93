//! Boundary feedback and shell hooks.
//!
//! Feedback is best effort. Nothing here may block the caller for long or
//! report an error back into the timer.

use std::io::Write;
use std::process::Command;

use tracing::{debug, warn};

/// Capability the core calls when a drag is refused (timer running) or pinned
/// at either end of the dial.
pub trait Feedback {
    fn notify_boundary(&self);
}

/// For hosts without any feedback capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn notify_boundary(&self) {}
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy)]
pub struct Bell {
    pub enabled: bool,
}

impl Feedback for Bell {
    fn notify_boundary(&self) {
        if self.enabled {
            ring_bell();
        }
    }
}

/// Runs a shell command without waiting for it.
#[derive(Debug, Clone, Default)]
pub struct Hook {
    pub command: Option<String>,
}

impl Feedback for Hook {
    fn notify_boundary(&self) {
        run_hook(self.command.as_deref());
    }
}

impl<A: Feedback, B: Feedback> Feedback for (A, B) {
    fn notify_boundary(&self) {
        self.0.notify_boundary();
        self.1.notify_boundary();
    }
}

impl<F: Feedback + ?Sized> Feedback for &F {
    fn notify_boundary(&self) {
        (**self).notify_boundary();
    }
}

/// Spawn `command` through `sh -c`. Empty commands and ones starting with `#`
/// are treated as disabled.
pub fn run_hook(command: Option<&str>) {
    let Some(command) = command else {
        debug!("no hook configured");
        return;
    };

    let trimmed = command.trim();
    if trimmed.is_empty() {
        debug!("hook is empty");
    } else if trimmed.starts_with('#') {
        debug!(command, "hook is commented out");
    } else if let Err(error) = Command::new("sh").arg("-c").arg(command).spawn() {
        warn!(command, %error, "failed to run hook");
    }
}

#[cfg(target_os = "macos")]
const SOUND_PLAYERS: &[(&str, &str)] = &[
    ("afplay", "/System/Library/Sounds/Glass.aiff"),
    ("afplay", "/System/Library/Sounds/Ping.aiff"),
];

#[cfg(target_os = "linux")]
const SOUND_PLAYERS: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/sound-icons/bell.wav"),
    ("paplay", "/usr/share/sounds/alsa/Front_Left.wav"),
    ("aplay", "/usr/share/sounds/alsa/Front_Left.wav"),
];

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
const SOUND_PLAYERS: &[(&str, &str)] = &[];

/// Completion alarm: a system sound where one can be played, otherwise the
/// terminal bell.
pub fn alarm() {
    for (player, sound) in SOUND_PLAYERS {
        let played = Command::new(player)
            .arg(sound)
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        if played {
            return;
        }
    }

    debug!("no sound player available, falling back to bell");
    ring_bell();
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    if write!(stdout, "\x07").and_then(|_| stdout.flush()).is_err() {
        warn!("could not ring terminal bell");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Count<'a>(&'a Cell<usize>);

    impl Feedback for Count<'_> {
        fn notify_boundary(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn pair_notifies_both() {
        let left = Cell::new(0);
        let right = Cell::new(0);
        (Count(&left), Count(&right)).notify_boundary();
        assert_eq!((left.get(), right.get()), (1, 1));
    }

    #[test]
    fn disabled_hooks_do_nothing() {
        run_hook(None);
        run_hook(Some("   "));
        run_hook(Some("# afplay ~/music/focus.mp3 &"));
        Hook::default().notify_boundary();
        Silent.notify_boundary();
        Bell { enabled: false }.notify_boundary();
    }
}
