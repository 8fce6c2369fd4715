use am4_optimizer::{
    economics::pricing::Ticket,
    search::{hubs::HubSummary, result::EvaluationResult},
};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use jiff::SignedDuration;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn money(value: f64) -> Cell {
    number(format!("${value:.0}"))
}

pub fn format_flight_time(duration: SignedDuration) -> String {
    let minutes = duration.as_secs() / 60;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn ticket_row(table: &mut Table, class: impl ToString, ticket: &Ticket) {
    table.add_row(vec![
        Cell::new(class),
        money(ticket.price),
        number(format!("{:.0} / {:.0}", ticket.load, ticket.capacity)),
        number(format!("{:.1}%", ticket.load_factor * 100.0)),
        money(ticket.revenue),
    ]);
}

pub fn evaluation_tables(result: &EvaluationResult) -> (Table, Table) {
    let economics = &result.economics;
    let schedule = &economics.schedule;
    let costs = &economics.costs;

    let mut summary = new_table(vec!["", ""]);
    let rows: Vec<(&str, String)> = vec![
        (
            "Route",
            format!("{} → {}", result.origin, result.destination),
        ),
        (
            "Aircraft",
            format!("{} ({})", result.aircraft, result.aircraft_kind),
        ),
        ("Distance", format!("{:.0} km", result.distance.value())),
        ("Bearing", format!("{:.1}°", result.bearing)),
        ("Configuration", economics.configuration.to_string()),
        ("Cruise", format!("{:.2}", economics.cruise.speed_factor())),
        ("Flight time", format_flight_time(schedule.flight_time)),
        ("Trips per day", format!("{:.2}", schedule.trips_per_day)),
        ("Aircraft needed", schedule.aircraft_needed.to_string()),
        (
            "Utilization",
            format!("{:.1}%", schedule.utilization * 100.0),
        ),
        (
            "Costs per trip",
            format!(
                "${:.0} (fuel ${:.0}, CO2 ${:.0}, crew ${:.0}, maintenance ${:.0}, wear ${:.0}, lease ${:.0})",
                costs.total,
                costs.fuel,
                costs.co2,
                costs.crew,
                costs.maintenance,
                costs.wear,
                costs.lease
            ),
        ),
        ("Revenue per trip", format!("${:.0}", economics.revenue)),
        ("Profit per trip", format!("${:.0}", economics.profit_per_trip)),
        ("Profit per day", format!("${:.0}", economics.profit_per_day)),
        ("Profit per km", format!("${:.2}", economics.profit_per_km)),
    ];
    for (label, value) in rows {
        summary.add_row(vec![Cell::new(label), Cell::new(value)]);
    }

    let mut tickets = new_table(vec!["Class", "Price", "Load", "Load factor", "Revenue"]);
    if let Some(pax) = &economics.tickets.pax {
        for (class, ticket) in pax.iter() {
            ticket_row(&mut tickets, class.code(), &ticket);
        }
    }
    if let Some(cargo) = &economics.tickets.cargo {
        for (class, ticket) in cargo.iter() {
            ticket_row(&mut tickets, class.code(), &ticket);
        }
    }

    (summary, tickets)
}

pub fn results_table(results: &[EvaluationResult]) -> Table {
    let mut table = new_table(vec![
        "#",
        "Origin",
        "Destination",
        "Aircraft",
        "Distance",
        "Flight time",
        "Configuration",
        "Trips/day",
        "Profit/trip",
        "Profit/day",
    ]);

    for (rank, result) in results.iter().enumerate() {
        let economics = &result.economics;
        table.add_row(vec![
            number(rank + 1),
            Cell::new(&result.origin),
            Cell::new(&result.destination),
            Cell::new(&result.aircraft),
            number(format!("{:.0} km", result.distance.value())),
            number(format_flight_time(economics.schedule.flight_time)),
            Cell::new(economics.configuration),
            number(format!("{:.2}", economics.schedule.trips_per_day)),
            money(economics.profit_per_trip),
            money(economics.profit_per_day),
        ]);
    }

    table
}

pub fn hubs_table(hubs: &[HubSummary]) -> Table {
    let mut table = new_table(vec![
        "Hub",
        "Existing",
        "Routes",
        "Aircraft",
        "Profit/day",
        "Best destination",
        "Best profit/day",
    ]);

    for hub in hubs {
        table.add_row(vec![
            Cell::new(&hub.origin),
            Cell::new(if hub.is_hub { "yes" } else { "" }),
            number(hub.routes),
            number(hub.aircraft_needed),
            money(hub.total_profit_per_day),
            Cell::new(&hub.best_destination),
            money(hub.best_profit_per_day),
        ]);
    }

    table
}
