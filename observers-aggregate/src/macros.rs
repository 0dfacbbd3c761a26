// Logging shims. `alog!` forwards to `tracing` under the `observers_aggregate` target; without the
// `tracing` feature every call expands to nothing and its arguments are never evaluated.

#[cfg(feature = "tracing")]
macro_rules! alog {
    ($level:ident, $($event:tt)+) => {
        tracing::$level!(target: "observers_aggregate", $($event)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! alog {
    ($level:ident, $($event:tt)+) => {};
}

macro_rules! atrace {
    ($($event:tt)+) => { alog!(trace, $($event)+) };
}

macro_rules! adebug {
    ($($event:tt)+) => { alog!(debug, $($event)+) };
}

macro_rules! awarn {
    ($($event:tt)+) => { alog!(warn, $($event)+) };
}
