fn main() {
    if let Err(e) = particle_engine::core::Engine::run() {
        eprintln!("Engine failed to start: {}", e);
        std::process::exit(1);
    }
}
