/// Run `$body`, logging at debug level how long it took.
macro_rules! timed {
    ($msg:expr, $($args:expr),+ ; $body:expr) => {{
        let msg = format!($msg, $($args),+);

        let start_time = std::time::Instant::now();
        trace!("Start: {}", msg);

        let out = $body;

        debug!("End:   {}: {:?}", msg, start_time.elapsed());

        out
    }};
    ($msg:expr ; $body:expr) => {{
        let msg: &str = $msg;

        let start_time = std::time::Instant::now();
        trace!("Start: {}", msg);

        let out = $body;

        debug!("End:   {}: {:?}", msg, start_time.elapsed());

        out
    }};
}
