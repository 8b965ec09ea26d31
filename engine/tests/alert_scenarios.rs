//! End-to-end host scenarios: alerts feeding the shared throttle.

use std::sync::{Arc, Mutex};

use engine::{
    AlertDispatcher, AlertEvent, AlertSink, AlertThrottle, Distance, DistanceUnit, Frequency,
    LevelAlert, LineAlert, Sample,
};
use geometry::Segment;

#[derive(Default)]
struct Collect(Mutex<Vec<AlertEvent>>);

impl AlertSink for Collect {
    fn on_alert(&self, event: &AlertEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn band_99_101(frequency: Frequency) -> LevelAlert {
    LevelAlert::new(0.5, 100.0, frequency, Distance::new(DistanceUnit::Tick, 2.0))
}

#[test]
fn price_skipping_over_band_is_reported() {
    let mut alert = band_99_101(Frequency::EveryTime);
    assert!(!alert.check(98.0, 0));
    assert!(alert.check(102.0, 0));
}

#[test]
fn two_alerts_on_one_instrument_share_a_bucket() {
    let throttle = Arc::new(AlertThrottle::default());
    let sink = Arc::new(Collect::default());

    let mut dispatcher = AlertDispatcher::new(Arc::clone(&throttle), 60_000);
    dispatcher.register_sink(sink.clone());

    // Two chart objects watching the same instrument with the same level.
    let mut a = band_99_101(Frequency::EveryTime);
    let mut b = band_99_101(Frequency::EveryTime);

    for (i, price) in [98.0, 100.0].into_iter().enumerate() {
        let sample = Sample::new(price, i as i32, i as f64);
        dispatcher.evaluate(&mut a, "BTC", &sample);
        dispatcher.evaluate(&mut b, "BTC", &sample);
    }

    assert_eq!(sink.0.lock().unwrap().len(), 1);
    assert_eq!(throttle.stats().suppressed, 1);
}

#[test]
fn line_and_level_alerts_through_one_dispatcher() {
    let sink = Arc::new(Collect::default());
    let mut dispatcher = AlertDispatcher::new(Arc::new(AlertThrottle::default()), 0);
    dispatcher.register_sink(sink.clone());

    let mut level = band_99_101(Frequency::OncePerBar);
    let line = Segment::new((0.0, 110.0), (10.0, 100.0), 1.0);
    let mut falling = LineAlert::new(0.5, line, Frequency::OncePerBar, Distance::exact());

    // Price rallies from 98 to 106 while the line falls from 110.
    let path = [98.0, 100.0, 102.0, 104.0, 106.0, 106.0];
    for (t, price) in path.into_iter().enumerate() {
        let sample = Sample::new(price, t as i32, t as f64);
        dispatcher.evaluate(&mut level, "ES", &sample);
        dispatcher.evaluate(&mut falling, "ES-line", &sample);
    }

    let events = sink.0.lock().unwrap();
    let instruments: Vec<&str> = events.iter().map(|e| e.instrument.as_str()).collect();
    assert_eq!(instruments, vec!["ES", "ES-line"]);
    // line value at t = 4 is 106
    assert_eq!(events[1].bar_index, 4);
}

#[test]
fn degenerate_line_is_silent_through_dispatcher() {
    let sink = Arc::new(Collect::default());
    let mut dispatcher = AlertDispatcher::new(Arc::new(AlertThrottle::default()), 0);
    dispatcher.register_sink(sink.clone());

    let vertical = Segment::new((3.0, 0.0), (3.0, 1_000.0), 2.0);
    let mut alert = LineAlert::new(0.25, vertical, Frequency::EveryTime, Distance::exact());

    for t in 0..20 {
        let sample = Sample::new(500.0 + t as f64, t, 3.0);
        assert!(!dispatcher.evaluate(&mut alert, "CL", &sample));
    }
    assert!(sink.0.lock().unwrap().is_empty());
}
