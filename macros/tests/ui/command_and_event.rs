use retro_macros::Action;

#[derive(Action)]
enum Mixed {
    #[command] #[event] Both,
}

fn main() {
    let _ = Mixed::Both;
}
