use std::num::NonZero;

use alcazar::Generator;

fn main() {
    let board = Generator::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
        .generate()
        .expect("a 5x5 board is always generable");

    println!("{board}");
}
