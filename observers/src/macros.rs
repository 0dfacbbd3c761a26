// Logging shims. `olog!` forwards to `tracing` under the `observers` target; without the `tracing`
// feature every call expands to nothing and its arguments are never evaluated.

#[cfg(feature = "tracing")]
macro_rules! olog {
    ($level:ident, $($event:tt)+) => {
        tracing::$level!(target: "observers", $($event)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! olog {
    ($level:ident, $($event:tt)+) => {};
}

macro_rules! otrace {
    ($($event:tt)+) => { olog!(trace, $($event)+) };
}

macro_rules! odebug {
    ($($event:tt)+) => { olog!(debug, $($event)+) };
}

macro_rules! owarn {
    ($($event:tt)+) => { olog!(warn, $($event)+) };
}
