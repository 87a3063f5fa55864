/// Checks that a numerical value lies in the half-open interval `(a,b]` and
/// returns a [`ConfigError::OutOfInterval`](crate::error::ConfigError::OutOfInterval)
/// from the enclosing function if not
///
/// `NaN` never passes the check.
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// check_interval!(alpha, 0.0, 1.0);
/// ```
/// This returns an error reading
/// "invalid value 2 for \`alpha\`, must be in the interval (0.0, 1.0]".
#[macro_export]
macro_rules! check_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var > $a && $var <= $b) {
            return Err($crate::error::ConfigError::OutOfInterval {
                name: stringify!($var),
                value: $var,
                interval: concat!("(", stringify!($a), ", ", stringify!($b), "]"),
            });
        }
    };
}
