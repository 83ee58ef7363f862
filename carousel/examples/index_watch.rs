// Example: observing index transitions exactly once per change.
use carousel::{Carousel, CarouselOptions, IndexChange};

fn main() {
    let mut c = Carousel::new(CarouselOptions::new(8, 100.0).with_looping(true).with_on_index_change(
        Some(|change: IndexChange| {
            println!("index {} -> {}", change.previous_index, change.index);
        }),
    ));

    // Sweep across several pages; the callback fires once per boundary crossing,
    // not once per frame.
    c.begin_pan();
    let mut t = 0.0;
    while t > -420.0 {
        t -= 12.5;
        c.update_pan(t);
    }
    c.end_pan();

    println!("final index = {}", c.index());
}
