use ironrook::engine::Engine;
use ironrook::uci::uci_loop;

fn main() {
    let mut engine = Engine::new();
    uci_loop(&mut engine);
}
