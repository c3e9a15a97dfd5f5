//! Demo client: wires up a small lot and drives it through the two scenarios
//! the engine is built for — a sequential park/release day and a burst of
//! concurrent arrivals competing for scarce spots.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use parklot::{
    Floor, Gate, GateType, ParkError, ParkingService, Spot, SpotSize, Vehicle, VehicleType,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    basic_scenario()?;
    concurrent_scenario()?;
    Ok(())
}

fn build_lot() -> anyhow::Result<ParkingService> {
    let floors = vec![
        Floor::new(vec![
            Spot::new("SPOT01", SpotSize::Small),
            Spot::new("SPOT02", SpotSize::Small),
            Spot::new("SPOT03", SpotSize::Medium),
            Spot::new("SPOT04", SpotSize::Small),
        ])?,
        Floor::new(vec![
            Spot::new("SPOT11", SpotSize::Small),
            Spot::new("SPOT12", SpotSize::Medium),
            Spot::new("SPOT13", SpotSize::Large),
            Spot::new("SPOT14", SpotSize::Medium),
        ])?,
        Floor::new(vec![
            Spot::new("SPOT21", SpotSize::Small),
            Spot::new("SPOT22", SpotSize::Small),
            Spot::new("SPOT23", SpotSize::Small),
            Spot::new("SPOT24", SpotSize::Small),
        ])?,
    ];
    let gates = vec![
        Gate::new("GATE01", GateType::Entry),
        Gate::new("GATE02", GateType::Exit),
        Gate::new("GATE03", GateType::Entry),
        Gate::new("GATE04", GateType::Emergency),
    ];
    Ok(ParkingService::new(floors, gates))
}

fn basic_scenario() -> anyhow::Result<()> {
    tracing::info!("--- basic parking scenario ---");
    let service = build_lot()?;

    let bike = Vehicle::new("VEHICLE01", VehicleType::Bike);
    let car = Vehicle::new("VEHICLE02", VehicleType::Car);
    let truck1 = Vehicle::new("VEHICLE03", VehicleType::Truck);
    let truck2 = Vehicle::new("VEHICLE04", VehicleType::Truck);

    service.park(&bike, "GATE01")?;
    service.park(&car, "GATE03")?;

    thread::sleep(Duration::from_millis(200));

    let ticket = service.unpark(&bike, "GATE02")?;
    tracing::info!(vehicle = %bike.id(), cost = ticket.cost().unwrap_or(0.0), "stay costed");

    thread::sleep(Duration::from_millis(100));

    let ticket = service.unpark(&car, "GATE02")?;
    tracing::info!(vehicle = %car.id(), cost = ticket.cost().unwrap_or(0.0), "stay costed");

    // Only one large spot exists: the second truck is turned away.
    service.park(&truck1, "GATE01")?;
    if let Err(e) = service.park(&truck2, "GATE03") {
        tracing::warn!(vehicle = %truck2.id(), error = %e, "park refused");
    }

    let ticket = service.unpark(&truck1, "GATE02")?;
    tracing::info!(vehicle = %truck1.id(), cost = ticket.cost().unwrap_or(0.0), "stay costed");

    report(&service);
    Ok(())
}

fn concurrent_scenario() -> anyhow::Result<()> {
    tracing::info!("--- concurrent parking scenario: 5 bikes, 2 small spots ---");
    let floor = Floor::new(vec![
        Spot::new("SMALL1", SpotSize::Small),
        Spot::new("SMALL2", SpotSize::Small),
    ])?;
    let gates = vec![
        Gate::new("ENTRY", GateType::Entry),
        Gate::new("EXIT", GateType::Exit),
    ];
    let service = Arc::new(ParkingService::new(vec![floor], gates));

    let contenders = 5;
    let barrier = Arc::new(Barrier::new(contenders));
    let handles: Vec<_> = (1..=contenders)
        .map(|i| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let bike = Vehicle::new(format!("BIKE{i:02}"), VehicleType::Bike);
                barrier.wait();
                match service.park(&bike, "ENTRY") {
                    Ok(ticket) => {
                        tracing::info!(vehicle = %bike.id(), spot = %ticket.spot_id(), "parked");
                    }
                    Err(ParkError::LotFull(_)) => {
                        tracing::info!(vehicle = %bike.id(), "turned away, lot full");
                    }
                    Err(e) => {
                        tracing::error!(vehicle = %bike.id(), error = %e, "unexpected park failure");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            anyhow::bail!("parking thread panicked");
        }
    }

    report(&service);
    Ok(())
}

fn report(service: &ParkingService) {
    let snapshot = service.occupancy();
    for (index, floor) in snapshot.floors.iter().enumerate() {
        tracing::info!(floor = index, occupied = floor.occupied, total = floor.total, "floor occupancy");
    }
    tracing::info!(
        rate_percent = snapshot.rate_percent(),
        vehicles_ticketed = snapshot.tickets_issued,
        "lot totals"
    );
}
