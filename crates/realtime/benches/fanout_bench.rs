use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use realtime::{ChannelSink, Frame, NotificationHub};
use sample_store::{ChangeEvent, Decimal, NewSample, SampleId};

fn make_event(id: i32) -> ChangeEvent {
    ChangeEvent::inserted(
        NewSample::new(
            "PLA",
            "Compost",
            10,
            Decimal::new(1520, 2),
            Decimal::new(2500, 2),
            Decimal::new(6000, 2),
        )
        .with_id(SampleId::new(id)),
    )
}

fn bench_encode_frame(c: &mut Criterion) {
    let event = make_event(1);

    c.bench_function("realtime/encode_frame", |b| {
        b.iter(|| Frame::encode(&event).unwrap());
    });
}

fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("realtime/broadcast");

    for subscribers in [1usize, 10, 100] {
        let hub = Arc::new(NotificationHub::new());
        let mut receivers = Vec::with_capacity(subscribers);
        for _ in 0..subscribers {
            let (sink, rx) = ChannelSink::new();
            hub.subscribe(Box::new(sink));
            receivers.push(rx);
        }
        let event = make_event(1);

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| {
                    hub.broadcast(&event).unwrap();
                    for rx in &mut receivers {
                        while rx.try_recv().is_ok() {}
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_connect_disconnect(c: &mut Criterion) {
    let hub = Arc::new(NotificationHub::new());

    c.bench_function("realtime/connect_disconnect", |b| {
        b.iter(|| drop(hub.connect()));
    });
}

criterion_group!(
    benches,
    bench_encode_frame,
    bench_broadcast,
    bench_connect_disconnect
);
criterion_main!(benches);
