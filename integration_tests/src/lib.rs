#[cfg(test)]
mod integration {
    use bevy_app::App;
    use bevy_ecs::prelude::*;

    use anyhow::Result;
    use protocol::{ClientToServer, ServerToClient};
    use server::characters::{
        ActiveEffect, CharacterBundle, CharacterId, Flight, HostState, Reserves,
    };
    use server::events::FlightRequest;
    use server::sync::{restore_character, FlightSaves, Outbox};
    use server::{build_server_app, Config};
    use sim::{species, CharacterMode, FlightPredicate, SpeciesSpec, Vec3};
    use uuid::Uuid;

    const CRUISE_TICKS: usize = 400;
    const AUTOSAVE_TICKS: u64 = 50;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn spawn_character(app: &mut App, spec: SpeciesSpec, mode: CharacterMode) -> (Entity, Uuid) {
        server::characters::spawn_character(app.world_mut(), spec, mode)
    }

    /// Give the character an upward flap with horizontal momentum; the
    /// second update sees the displacement and engages flight.
    fn flap(app: &mut App, entity: Entity) {
        {
            let mut host = app.world_mut().get_mut::<HostState>(entity).unwrap();
            host.inputs.velocity = Vec3::new(0.5, 0.5, 0.0);
            host.inputs.look_direction = Vec3::new(1.0, 0.0, 0.0);
        }
        app.update();
        app.update();
    }

    #[test]
    fn survival_flight_lifecycle() -> Result<()> {
        init_tracing();

        let mut app = build_server_app(Config {
            autosave_ticks: AUTOSAVE_TICKS,
            ..Config::default()
        });
        let (entity, id) =
            spawn_character(&mut app, species::skylark_spec(), CharacterMode::Survival);

        flap(&mut app, entity);
        assert!(
            app.world().get::<Flight>(entity).unwrap().0.is_flying_survival,
            "flap gesture engages survival flight"
        );

        for _ in 0..CRUISE_TICKS {
            app.update();
        }

        // Resource feedback after a long flight: mana drained past the
        // thresholds, exertion and energy rose, exhaustion accrued.
        let reserves = &app.world().get::<Reserves>(entity).unwrap().0;
        assert!(reserves.mana().percent_fill() < 0.2);
        assert!(reserves.exertion().get() > 0.0);
        assert!(reserves.energy().get() > 0.0);
        assert!(
            reserves.xp().get() > 0.0,
            "flight spending is the experience source"
        );
        assert!(
            app.world().get::<HostState>(entity).unwrap().exhaustion > 0.0,
            "deep-drain flight exhausts the flier"
        );

        // Replication: the join, the flight transition, and the dirty bars
        // all became messages for this character.
        let messages = app.world().resource::<Outbox>().drain();
        assert!(messages.iter().any(|m| matches!(
            m,
            ServerToClient::JoinAck { character } if *character == id
        )));
        assert!(messages.iter().any(|m| matches!(
            m,
            ServerToClient::FlightSync { character, is_flying: true, .. } if *character == id
        )));
        assert!(messages.iter().any(|m| matches!(
            m,
            ServerToClient::ReservesSync { character, .. } if *character == id
        )));

        // Autosave caught the character mid-flight.
        let record = app
            .world()
            .resource::<FlightSaves>()
            .get(&id)
            .expect("autosave captured a record");
        assert!(record.is_flying_survival);
        assert!(record.ticks_in_air > 100);

        // Landing gesture grounds it.
        {
            let mut host = app.world_mut().get_mut::<HostState>(entity).unwrap();
            host.inputs.grounded = true;
            host.inputs.sneaking = true;
        }
        app.update();
        let flight = app.world().get::<Flight>(entity).unwrap();
        assert!(!flight.0.is_flying_survival);
        assert_eq!(flight.0.ticks_in_air, 0);

        // The mid-flight record restores onto a fresh character elsewhere.
        let mut app2 = build_server_app(Config::default());
        let (entity2, id2) =
            spawn_character(&mut app2, species::skylark_spec(), CharacterMode::Survival);
        let world = app2.world_mut();
        let mut q = world.query::<(&CharacterId, &mut Flight, &mut HostState)>();
        for (cid, mut flight, mut host) in q.iter_mut(world) {
            if cid.0 == id2 {
                restore_character(&record, &mut flight, &mut host);
            }
        }
        let restored = app2.world().get::<Flight>(entity2).unwrap();
        assert_eq!(restored.0.is_flying_survival, record.is_flying_survival);
        assert_eq!(restored.0.ticks_in_air, record.ticks_in_air);
        assert!(app2
            .world()
            .get::<HostState>(entity2)
            .unwrap()
            .dimensions_dirty);

        Ok(())
    }

    #[test]
    fn override_flight_never_touches_reserves() {
        init_tracing();

        let mut app = build_server_app(Config::default());
        let (entity, id) =
            spawn_character(&mut app, species::earthbound_spec(), CharacterMode::Creative);
        {
            let mut host = app.world_mut().get_mut::<HostState>(entity).unwrap();
            host.inputs.flying = true;
            host.inputs.velocity = Vec3::new(0.6, 0.6, 0.0);
        }

        for _ in 0..300 {
            app.update();
        }

        let flight = app.world().get::<Flight>(entity).unwrap();
        assert!(!flight.0.is_flying_survival, "override flight is not survival");
        assert!(flight.0.is_flying_either);
        assert_eq!(flight.0.ticks_in_air, 0, "override flight skips the physics");

        let reserves = &app.world().get::<Reserves>(entity).unwrap().0;
        assert_eq!(reserves.mana().get(), 100.0);
        assert_eq!(reserves.exertion().get(), 0.0);

        let messages = app.world().resource::<Outbox>().drain();
        assert!(!messages.iter().any(|m| matches!(
            m,
            ServerToClient::ReservesSync { character, .. } if *character == id
        )));
    }

    struct GroundingHex;

    impl FlightPredicate for GroundingHex {
        fn is_terminated(&self) -> bool {
            false
        }
        fn check_can_fly(&self) -> bool {
            false
        }
    }

    #[test]
    fn denied_effect_blocks_flight_requests_over_the_wire() {
        init_tracing();

        let mut app = build_server_app(Config::default());
        let id = Uuid::new_v4();
        let mut bundle =
            CharacterBundle::new(id, species::skylark_spec(), CharacterMode::Survival);
        bundle.effect = ActiveEffect(Some(Box::new(GroundingHex)));
        let entity = app.world_mut().spawn(bundle).id();

        // Simulate the transport: the request arrives as bytes.
        let bytes =
            protocol::encode(&ClientToServer::FlightRequest { flying: true }).expect("encode");
        let decoded: ClientToServer = protocol::decode(&bytes).expect("decode");
        let ClientToServer::FlightRequest { flying } = decoded else {
            panic!("unexpected message variant");
        };

        app.world_mut().send_event(FlightRequest {
            character: id,
            flying,
        });
        app.update();

        assert!(
            !app.world().get::<Flight>(entity).unwrap().0.is_flying_survival,
            "a live denying effect overrides the species trait"
        );
    }
}
