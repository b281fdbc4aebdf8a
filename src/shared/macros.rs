/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a startup step or logs the error and exits. Only for failures
/// the viewer cannot run without (configuration, surface, display slots).
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr, $what:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("{}: {}", $what, e);
                std::process::exit(1);
            }
        }
    };
}
