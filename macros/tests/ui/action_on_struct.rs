use retro_macros::Action;

#[derive(Action)]
struct Counter;

fn main() {
    let _ = Counter;
}
