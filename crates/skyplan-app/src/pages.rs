//! Table configurations for each resource page

use std::collections::HashMap;

use skyplan_core::{
    Aerodrome, AircraftProfile, Flight, FlightStatus, Passenger, User, Waypoint,
};
use skyplan_settings::TableSettings;
use skyplan_table::{
    FilterDefinition, FilterSpec, RowCallback, RowPermissions, SearchSpec, TableConfig,
    TableConfigBuilder, TableConfigError, TableRow,
};

/// Supplies the delete callback for the row of entity `id`, if deleting is
/// offered on the page
pub type DeleteHook<'a> = &'a dyn Fn(i64) -> Option<RowCallback>;

fn builder(settings: &TableSettings) -> TableConfigBuilder {
    TableConfig::builder()
        .page_size(settings.page_size)
        .empty_message(settings.empty_message.clone())
}

/// Row for entity `id` whose edit button opens `/{path}/{id}`
fn entity_row(path: &str, id: i64, on_delete: DeleteHook<'_>) -> TableRow {
    let row = TableRow::new()
        .with_id(id)
        .navigate_to(format!("/{}/{}", path, id));
    match on_delete(id) {
        Some(callback) => row.on_delete(move || callback()),
        None => row,
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn coordinate(degrees: f64) -> String {
    format!("{:.4}", degrees)
}

pub fn aircraft_table(
    profiles: &[AircraftProfile],
    settings: &TableSettings,
    on_delete: DeleteHook<'_>,
) -> Result<TableConfig, TableConfigError> {
    let rows = profiles
        .iter()
        .map(|p| {
            entity_row("aircraft", p.id, on_delete)
                .cell("registration", p.registration.as_str())
                .cell("model", p.model.as_str())
                .cell("fuel_capacity", p.fuel_capacity_gal)
                .cell("mtow", p.max_takeoff_weight_lb)
                .cell("preferred", yes_no(p.is_preferred))
        })
        .collect();

    builder(settings)
        .column("registration", "Registration")
        .column("model", "Model")
        .column("fuel_capacity", "Fuel (gal)")
        .column("mtow", "MTOW (lb)")
        .column("preferred", "Preferred")
        .rows(rows)
        .sortable("registration", "Registration")
        .sortable("model", "Model")
        .sortable("mtow", "MTOW")
        .search(SearchSpec::new("Search aircraft...", ["registration", "model"]))
        .filters(FilterSpec::new(
            "Preferred",
            vec![
                FilterDefinition::new("preferred", "Yes", "Preferred"),
                FilterDefinition::new("preferred", "No", "Not preferred"),
            ],
        ))
        .build()
}

/// Official aerodromes are read-only; user-created ones can be edited and
/// deleted.
pub fn aerodromes_table(
    aerodromes: &[Aerodrome],
    settings: &TableSettings,
    on_delete: DeleteHook<'_>,
) -> Result<TableConfig, TableConfigError> {
    let rows = aerodromes
        .iter()
        .map(|a| {
            let permissions = if a.is_registered {
                RowPermissions::View
            } else {
                RowPermissions::EditDelete
            };
            entity_row("aerodromes", a.id, on_delete)
                .cell("code", a.code.as_str())
                .cell("name", a.name.as_str())
                .cell("elevation", a.elevation_ft)
                .cell("lat", coordinate(a.lat_degrees))
                .cell("lon", coordinate(a.lon_degrees))
                .cell("kind", if a.is_registered { "Registered" } else { "Private" })
                .with_permissions(permissions)
        })
        .collect();

    builder(settings)
        .column("code", "Code")
        .column("name", "Name")
        .column("elevation", "Elevation (ft)")
        .column("lat", "Latitude")
        .column("lon", "Longitude")
        .column("kind", "Type")
        .rows(rows)
        .sortable("code", "Code")
        .sortable("name", "Name")
        .sortable("elevation", "Elevation")
        .search(SearchSpec::new("Search aerodromes...", ["code", "name"]))
        .filters(FilterSpec::new(
            "Type",
            vec![
                FilterDefinition::new("kind", "Registered", "Registered"),
                FilterDefinition::new("kind", "Private", "Private"),
            ],
        ))
        .build()
}

pub fn waypoints_table(
    waypoints: &[Waypoint],
    settings: &TableSettings,
    on_delete: DeleteHook<'_>,
) -> Result<TableConfig, TableConfigError> {
    let rows = waypoints
        .iter()
        .map(|w| {
            entity_row("waypoints", w.id, on_delete)
                .cell("code", w.code.as_str())
                .cell("name", w.name.as_str())
                .cell("lat", coordinate(w.lat_degrees))
                .cell("lon", coordinate(w.lon_degrees))
                .cell("variation", w.magnetic_variation)
        })
        .collect();

    builder(settings)
        .column("code", "Code")
        .column("name", "Name")
        .column("lat", "Latitude")
        .column("lon", "Longitude")
        .column("variation", "Mag. var.")
        .rows(rows)
        .sortable("code", "Code")
        .sortable("name", "Name")
        .search(SearchSpec::new("Search waypoints...", ["code", "name"]))
        .build()
}

/// The passenger representing the signed-in user can be edited but not
/// deleted.
pub fn passengers_table(
    passengers: &[Passenger],
    settings: &TableSettings,
    on_delete: DeleteHook<'_>,
) -> Result<TableConfig, TableConfigError> {
    let rows = passengers
        .iter()
        .map(|p| {
            let row = entity_row("passengers", p.id, on_delete)
                .cell("name", p.name.as_str())
                .cell("weight", p.weight_lb);
            if p.is_me {
                row.with_permissions(RowPermissions::Edit)
            } else {
                row
            }
        })
        .collect();

    builder(settings)
        .column("name", "Name")
        .column("weight", "Weight (lb)")
        .rows(rows)
        .sortable("name", "Name")
        .sortable("weight", "Weight")
        .search(SearchSpec::new("Search passengers...", ["name"]))
        .build()
}

/// Flights show aerodrome codes and aircraft registrations where known.
/// Completed flights can be viewed and deleted but no longer edited.
pub fn flights_table(
    flights: &[Flight],
    aerodromes: &[Aerodrome],
    aircraft: &[AircraftProfile],
    settings: &TableSettings,
    on_delete: DeleteHook<'_>,
) -> Result<TableConfig, TableConfigError> {
    let codes: HashMap<i64, &str> = aerodromes.iter().map(|a| (a.id, a.code.as_str())).collect();
    let registrations: HashMap<i64, &str> = aircraft
        .iter()
        .map(|a| (a.id, a.registration.as_str()))
        .collect();
    let lookup = |names: &HashMap<i64, &str>, id: i64| {
        names
            .get(&id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("#{}", id))
    };

    let rows = flights
        .iter()
        .map(|f| {
            let row = entity_row("flights", f.id, on_delete)
                .cell("id", f.id)
                .cell("departure", lookup(&codes, f.departure_aerodrome_id))
                .cell("arrival", lookup(&codes, f.arrival_aerodrome_id))
                .cell("aircraft", lookup(&registrations, f.aircraft_id))
                .cell("departure_time", f.departure_time.format("%Y-%m-%d %H:%M").to_string())
                .cell("status", f.status.label());
            if f.status == FlightStatus::Completed {
                row.with_permissions(RowPermissions::ViewDelete)
            } else {
                row
            }
        })
        .collect();

    let statuses = FlightStatus::all()
        .iter()
        .map(|s| FilterDefinition::new("status", s.label(), s.label()))
        .collect();

    builder(settings)
        .column("id", "Flight")
        .column("departure", "From")
        .column("arrival", "To")
        .column("aircraft", "Aircraft")
        .column("departure_time", "Departure (UTC)")
        .column("status", "Status")
        .rows(rows)
        .sortable("id", "Flight")
        .sortable("departure_time", "Departure")
        .sortable("status", "Status")
        .search(SearchSpec::new(
            "Search flights...",
            ["departure", "arrival", "aircraft"],
        ))
        .filters(FilterSpec::new("Status", statuses))
        .build()
}

/// Administrators are shown read-only.
pub fn users_table(
    users: &[User],
    settings: &TableSettings,
    on_delete: DeleteHook<'_>,
) -> Result<TableConfig, TableConfigError> {
    let rows = users
        .iter()
        .map(|u| {
            let row = entity_row("users", u.id, on_delete)
                .cell("name", u.name.as_str())
                .cell("email", u.email.as_str())
                .cell("weight", u.weight_lb)
                .cell("role", if u.is_admin { "Admin" } else { "User" });
            if u.is_admin {
                row.with_permissions(RowPermissions::View)
            } else {
                row
            }
        })
        .collect();

    builder(settings)
        .column("name", "Name")
        .column("email", "Email")
        .column("weight", "Weight (lb)")
        .column("role", "Role")
        .rows(rows)
        .sortable("name", "Name")
        .sortable("email", "Email")
        .search(SearchSpec::new("Search users...", ["name", "email"]))
        .filters(FilterSpec::new(
            "Role",
            vec![
                FilterDefinition::new("role", "Admin", "Admin"),
                FilterDefinition::new("role", "User", "User"),
            ],
        ))
        .build()
}
