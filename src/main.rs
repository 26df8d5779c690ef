fn main() {
    if let Err(err) = trace_timeline_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
