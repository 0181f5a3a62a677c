use crate::error::PagerError;

/// Reports a contract breach that the pager cannot recover from and aborts.
///
/// Used for programming errors that would otherwise leave the pager silently
/// out of sync, such as a second observer taking over its scroll view.
#[track_caller]
pub fn fatal(error: PagerError) -> ! {
    log::error!("Pager: fatal contract violation: {}", error);
    panic!("{}", error);
}
