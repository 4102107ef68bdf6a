use common::{GuestId, HouseholdId};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{
    AddGuest, Aggregate, CreateHousehold, Guest, GuestList, GuestListService, GuestUpdate,
    NewGuest, household_code,
};
use snapshot_store::InMemorySnapshotStore;

/// Builds a list of `households` households with `per_household` guests each.
fn populated_list(households: u32, per_household: u32) -> GuestList {
    let mut list = GuestList::new();
    for h in 1..=households {
        let (next, household) = list.create_household().unwrap();
        list = next;
        for g in 0..per_household {
            let id = GuestId::from(format!("guest-{h}-{g}"));
            let guest = Guest::create(
                NewGuest::new(format!("Guest {h}-{g}"), ""),
                Some(id.clone()),
            )
            .unwrap();
            list = list
                .add_guest(guest)
                .unwrap()
                .add_guest_to_household(household.id(), &id)
                .unwrap();
        }
    }
    list
}

fn bench_household_code(c: &mut Criterion) {
    c.bench_function("guest_list/household_code", |b| {
        let mut id = 0u32;
        b.iter(|| {
            id = id.wrapping_add(1);
            household_code(HouseholdId::new(id))
        });
    });
}

fn bench_add_guest(c: &mut Criterion) {
    let mut group = c.benchmark_group("guest_list/add_guest");
    for size in [10u32, 100] {
        let list = populated_list(size, 4);
        group.bench_with_input(BenchmarkId::from_parameter(size * 4), &list, |b, list| {
            b.iter(|| {
                let guest = Guest::create(NewGuest::new("Newcomer", ""), None).unwrap();
                list.add_guest(guest).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_rsvp(c: &mut Criterion) {
    let mut group = c.benchmark_group("guest_list/rsvp");
    for size in [10u32, 100] {
        let list = populated_list(size, 4);
        let household = list.household(HouseholdId::first()).unwrap();
        let code = household.code().as_str().to_string();
        let updates: Vec<GuestUpdate> = list
            .members(household)
            .into_iter()
            .map(|guest| {
                let mut update = GuestUpdate::from_guest(guest);
                update.attending = Some(true);
                update
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size * 4), &list, |b, list| {
            b.iter(|| list.rsvp(&code, &updates).unwrap());
        });
    }
    group.finish();
}

fn bench_check_invariants(c: &mut Criterion) {
    let list = populated_list(100, 4);

    c.bench_function("guest_list/check_invariants_400_guests", |b| {
        b.iter(|| list.check_invariants().unwrap());
    });
}

fn bench_service_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("guest_list/service_create_household_add_guest", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = GuestListService::new(InMemorySnapshotStore::new());
                service.create_household(CreateHousehold).await.unwrap();
                service
                    .add_guest(AddGuest::new(NewGuest::new("Alice", "alice@example.com")))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_household_code,
    bench_add_guest,
    bench_rsvp,
    bench_check_invariants,
    bench_service_cycle,
);
criterion_main!(benches);
