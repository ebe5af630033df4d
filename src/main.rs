fn main() {
    if let Err(e) = dental_scheduler_lib::run() {
        eprintln!("dental-scheduler: {e}");
        std::process::exit(1);
    }
}
