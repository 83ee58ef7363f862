// Example: minimal usage — drive a pan gesture and reconfigure live.
use carousel::{Carousel, CarouselOptions};

fn main() {
    let mut c = Carousel::new(CarouselOptions::new(5, 320.0).with_looping(true));

    // A drag streams cumulative translations, one per frame.
    c.begin_pan();
    for t in [-40.0, -120.0, -260.0, -350.0] {
        c.update_pan(t);
        println!("offset={} index={}", c.offset(), c.index());
    }
    let released = c.end_pan();
    println!("released at {released}");

    // The dataset shrinks while the offset is in flight; the visible item stays put.
    c.set_count(4);
    println!("after shrink: offset={} index={}", c.offset(), c.index());

    // The item is measured differently after a rotation; the index is preserved.
    c.set_item_size(480.0);
    println!("after resize: offset={} index={}", c.offset(), c.index());
}
