// Terminal feedback shared by the binaries. Network calls run behind an
// indicatif spinner; the spinner must be cleared before any error reaches
// the user so the message never lands after a stale spinner line.

use indicatif::{ProgressBar, ProgressStyle};

/// Run `f` behind a spinner showing `msg`, clearing the spinner whether
/// `f` succeeds or fails before handing the result back.
pub fn with_spinner<T, E>(
    msg: &str,
    f: impl FnOnce() -> std::result::Result<T, E>,
) -> std::result::Result<T, E> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(msg.to_string());
    let result = f();
    spinner.finish_and_clear();
    result
}
