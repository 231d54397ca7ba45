use nodemesh::params::FieldParams;
use nodemesh::visuals::VisualConfig;

fn main() {
    env_logger::init();

    if let Err(e) = nodemesh::window::run(FieldParams::default(), VisualConfig::default()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
