//! Availability computation over a busy service day.

use std::hint::black_box;

use chrono::{NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{compute_available_slots, Reservation, ReservationStatus, Settings, Table};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn busy_day() -> (NaiveDate, Settings, Vec<Table>, Vec<Reservation>) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let settings = Settings::new(90).with_hours("monday", t(11, 0), t(23, 0));
    let tables: Vec<Table> = (0..40)
        .map(|i| Table::new(format!("t{}", i), 2 + (i % 4) * 2))
        .collect();

    // Two seatings per table, staggered across the evening.
    let reservations = tables
        .iter()
        .enumerate()
        .flat_map(|(i, table)| {
            let first = t(12 + (i as u32 % 3), 15 * (i as u32 % 4));
            let second = t(18 + (i as u32 % 3), 15 * (i as u32 % 4));
            [first, second].into_iter().enumerate().map(move |(n, time)| Reservation {
                id: format!("r{}-{}", i, n),
                table_id: table.id.clone(),
                date,
                time,
                covers: 2,
                guest_name: String::new(),
                phone: None,
                email: None,
                notes: None,
                status: ReservationStatus::Confirmed,
            })
        })
        .collect();

    (date, settings, tables, reservations)
}

fn bench_compute(c: &mut Criterion) {
    let (date, settings, tables, reservations) = busy_day();

    c.bench_function("compute_available_slots/40_tables_80_bookings", |b| {
        b.iter(|| {
            compute_available_slots(
                black_box(date),
                black_box(2),
                &settings,
                &reservations,
                &tables,
                &[],
            )
        })
    });
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
