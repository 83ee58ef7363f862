use carousel_adapter::Controller;

fn main() {
    // Example: a controller settling a released drag without holding any UI objects.
    //
    // An adapter would:
    // - forward pan begin/update/end from its gesture recognizer
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned offset to the real transform (if any)
    // - render using the carousel state
    let mut c = Controller::new(carousel::CarouselOptions::new(6, 300.0));

    c.on_pan_begin();
    c.on_pan_update(-180.0);
    let target = c.on_pan_end(-180.0, -900.0, 0);
    println!("settling toward {target}");

    let mut now_ms = 0u64;
    while c.is_animating() {
        now_ms += 16;
        if let Some(off) = c.tick(now_ms) {
            if now_ms.is_multiple_of(80) {
                println!("t={now_ms} off={off} index={}", c.carousel().index());
            }
        }
    }

    println!(
        "done: off={} index={}",
        c.carousel().offset(),
        c.carousel().index()
    );
}
