mod common;

use std::collections::HashSet;

use seaorm_parking_lot::{allocation, ParkingError, SizeClass, SizePolicy};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_spot_two_cars_exactly_one_wins() {
    let (lot, _) = common::lot().await;
    lot.create_spot(1, 1, SizeClass::Car).await.unwrap();

    let a = tokio::spawn({
        let lot = lot.clone();
        async move { lot.check_in("ABC123", SizeClass::Car).await }
    });
    let b = tokio::spawn({
        let lot = lot.clone();
        async move { lot.check_in("XYZ789", SizeClass::Motorcycle).await }
    });
    let results = [a.await.unwrap(), b.await.unwrap()];

    let won = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(ParkingError::NoSpotAvailable(_))))
        .count();
    assert_eq!((won, full), (1, 1));

    assert!(lot.list_available_spots().await.unwrap().is_empty());
    assert_eq!(common::transaction_count(&lot).await, 1);
    // The loser's vehicle row went down with its unit of work.
    assert_eq!(common::vehicle_count(&lot).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_check_ins_get_distinct_spots() {
    let (lot, _) = common::lot().await;
    for number in 1..=8 {
        lot.create_spot(1, number, SizeClass::Car).await.unwrap();
    }

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let lot = lot.clone();
            tokio::spawn(async move { lot.check_in(&format!("CAR{i}"), SizeClass::Car).await })
        })
        .collect();

    let mut claimed = HashSet::new();
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(ticket) => assert!(claimed.insert(ticket.spot.spot_number)),
            Err(ParkingError::NoSpotAvailable(_)) => rejected += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(claimed.len(), 8);
    assert_eq!(rejected, 4);
    assert_eq!(claimed, (1..=8).collect::<HashSet<_>>());
    assert!(lot.list_available_spots().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_check_outs_bill_once() {
    let (lot, _) = common::lot().await;
    lot.create_spot(1, 1, SizeClass::Car).await.unwrap();
    lot.check_in("ABC123", SizeClass::Car).await.unwrap();

    let a = tokio::spawn({
        let lot = lot.clone();
        async move { lot.check_out("ABC123").await }
    });
    let b = tokio::spawn({
        let lot = lot.clone();
        async move { lot.check_out("ABC123").await }
    });
    let results = [a.await.unwrap(), b.await.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(ParkingError::NoActiveSession(_)))));
    assert_eq!(lot.list_available_spots().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pooled_writers_race_for_one_spot() {
    for round in 0..10 {
        let shared = common::shared_lot(4).await;
        let lot = &shared.lot;
        lot.create_spot(1, 1, SizeClass::Car).await.unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let lot = lot.clone();
                let plate = format!("R{round}C{i}");
                tokio::spawn(async move { lot.check_in(&plate, SizeClass::Car).await })
            })
            .collect();

        let mut won = 0;
        let mut full = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => won += 1,
                Err(ParkingError::NoSpotAvailable(SizeClass::Car)) => full += 1,
                Err(other) => panic!("round {round}: unexpected error: {other:?}"),
            }
        }

        assert_eq!((won, full), (1, 3), "round {round}");
        assert!(lot.list_available_spots().await.unwrap().is_empty());
        assert_eq!(common::transaction_count(lot).await, 1);
        assert_eq!(common::vehicle_count(lot).await, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pooled_writers_get_distinct_spots() {
    let shared = common::shared_lot(4).await;
    let lot = &shared.lot;
    for number in 1..=8 {
        lot.create_spot(1, number, SizeClass::Car).await.unwrap();
    }

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let lot = lot.clone();
            tokio::spawn(async move { lot.check_in(&format!("CAR{i}"), SizeClass::Car).await })
        })
        .collect();

    let mut claimed = HashSet::new();
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(ticket) => assert!(claimed.insert(ticket.spot.spot_number)),
            Err(ParkingError::NoSpotAvailable(_)) => rejected += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(claimed, (1..=8).collect::<HashSet<_>>());
    assert_eq!(rejected, 4);
    assert_eq!(common::transaction_count(lot).await, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pooled_check_outs_bill_once() {
    let shared = common::shared_lot(4).await;
    let lot = &shared.lot;
    lot.create_spot(1, 1, SizeClass::Car).await.unwrap();
    lot.check_in("ABC123", SizeClass::Car).await.unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lot = lot.clone();
            tokio::spawn(async move { lot.check_out("ABC123").await })
        })
        .collect();

    let mut billed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => billed += 1,
            Err(ParkingError::NoActiveSession(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(billed, 1);
    assert_eq!(lot.list_available_spots().await.unwrap().len(), 1);
}

#[tokio::test]
async fn allocate_without_match_changes_nothing() {
    let (lot, _) = common::lot().await;
    lot.create_spot(1, 1, SizeClass::Motorcycle).await.unwrap();
    lot.create_spot(1, 2, SizeClass::Car).await.unwrap();

    let policy = SizePolicy::default();
    let err = allocation::allocate(lot.connection(), &policy, SizeClass::Bus)
        .await
        .unwrap_err();
    assert!(matches!(err, ParkingError::NoSpotAvailable(SizeClass::Bus)));
    assert_eq!(lot.list_available_spots().await.unwrap().len(), 2);

    let spot = allocation::allocate(lot.connection(), &policy, SizeClass::Car)
        .await
        .unwrap();
    assert_eq!((spot.spot_number, spot.is_available), (2, false));

    let remaining = lot.list_available_spots().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].size, SizeClass::Motorcycle);
}
