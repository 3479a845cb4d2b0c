use sketchbody::prelude::*;

fn circle(x: FloatNum, y: FloatNum, radius: FloatNum, material: Material) -> Body {
    Physics::new_body(
        ShapeKind::Circle,
        Bounds::new((x - radius, y - radius), (x + radius, y + radius)).shared(),
        material,
    )
    .unwrap()
}

fn weightless() -> Settings {
    SettingsBuilder::new().gravity(0.).build()
}

#[test]
fn test_integrators_are_idempotent_at_rest() {
    for integrator in [
        Integrator::Euler,
        Integrator::SymplecticEuler,
        Integrator::Verlet,
    ] {
        let settings = SettingsBuilder::new()
            .gravity(0.)
            .integrator(integrator)
            .build();
        let mut physics = Physics::new(settings);
        let id = physics.add_body(circle(3., 4., 1., Material::named("wood")));

        for frame in 0..20 {
            physics.step(frame as FloatNum / 60., 1. / 60.);
        }

        let body = physics.body(id).unwrap();
        assert_eq!(body.position(), Point::new(3., 4.), "{integrator:?}");
        assert_eq!(body.velocity(), Vector::ZERO, "{integrator:?}");
        assert_eq!(body.angle(), 0., "{integrator:?}");
    }
}

#[test]
fn test_linear_damping_decays_geometrically() {
    let settings = SettingsBuilder::new()
        .gravity(0.)
        .linear_damping(0.5)
        .rotational_damping(0.8)
        .build();
    let mut physics = Physics::new(settings);
    let id = physics.add_body(circle(0., 0., 1., Material::named("rock")));
    physics
        .body_mut(id)
        .unwrap()
        .set_velocity(|_| Vector::new(4., 0.))
        .set_angular_velocity(|_| 2.);

    for n in 1..=5 {
        physics.step(0., 0.1);
        let body = physics.body(id).unwrap();
        let expected = 4. * (0.5 as FloatNum).powi(n);
        assert!((body.velocity().x() - expected).abs() < 1e-5);
        let expected_angular = 2. * (0.8 as FloatNum).powi(n);
        assert!((body.angular_velocity() - expected_angular).abs() < 1e-5);
    }
}

#[test]
fn test_head_on_elastic_collision_exchanges_velocities() {
    let elastic = MaterialBuilder::new()
        .density(1.)
        .restitution(1.)
        .static_friction(0.)
        .dynamic_friction(0.)
        .build();
    let mut physics = Physics::new(weightless());
    let a = physics.add_body(circle(0., 0., 1., elastic));
    let b = physics.add_body(circle(1.9, 0., 1., elastic));
    physics.body_mut(a).unwrap().set_velocity(|_| Vector::new(1., 0.));
    physics.body_mut(b).unwrap().set_velocity(|_| Vector::new(-1., 0.));

    physics.step(0., 1. / 60.);

    let va = physics.body(a).unwrap().velocity();
    let vb = physics.body(b).unwrap().velocity();
    assert!((va.x() + 1.).abs() < 1e-5);
    assert!((vb.x() - 1.).abs() < 1e-5);
    assert!(va.y().abs() < 1e-6 && vb.y().abs() < 1e-6);
    assert_eq!(physics.collision().last_colliding_pairs(), 1);
    assert!((physics.total_momentum().x()).abs() < 1e-5);
}

#[test]
fn test_resize_moves_body_to_new_centroid() {
    let mut physics = Physics::new(weightless());
    let bounds = Bounds::new((0., 0.), (2., 2.)).shared();
    let id = physics.add_body(
        Physics::new_body(ShapeKind::Box, bounds.clone(), Material::named("wood")).unwrap(),
    );
    let mass_before = physics.body(id).unwrap().inertial_mass();

    let event = bounds.borrow_mut().resize(10., 10., 14., 14.);
    assert_eq!(event.centroid, Point::new(12., 12.));
    assert!(physics.body(id).unwrap().has_pending_resize());

    physics.step(0., 0.1);

    let body = physics.body(id).unwrap();
    assert_eq!(body.position(), Point::new(12., 12.));
    assert_eq!(body.previous_position(), Point::new(12., 12.));
    assert!((body.inertial_mass() - mass_before * 4.).abs() < 1e-4);
    assert!(!body.has_pending_resize());
}

#[test]
fn test_removed_body_releases_bounds() {
    let mut physics = Physics::default();
    let bounds = Bounds::new((0., 0.), (1., 1.)).shared();
    let id = physics.add_body(
        Physics::new_body(ShapeKind::Circle, bounds.clone(), Material::default()).unwrap(),
    );
    assert_eq!(bounds.borrow().subscriber_count(), 1);

    let body = physics.remove_body(id);
    assert!(body.is_some());
    drop(body);

    assert_eq!(bounds.borrow().subscriber_count(), 0);
    assert!(physics.body(id).is_none());
    assert!(physics.remove_body(id).is_none());
}

#[test]
fn test_static_ground_holds_falling_box() {
    let mut physics = Physics::default();
    let ground = physics.add_body(
        Physics::new_body_named("box", Bounds::new((-10., 10.), (10., 12.)).shared(), "static")
            .unwrap(),
    );
    let crate_id = physics.add_body(
        Physics::new_body_named("box", Bounds::new((-1., 7.), (1., 9.)).shared(), "wood")
            .unwrap(),
    );

    for frame in 0..240 {
        physics.step(frame as FloatNum / 60., 1. / 60.);
    }

    let ground = physics.body(ground).unwrap();
    assert_eq!(ground.position(), Point::new(0., 11.));

    let falling = physics.body(crate_id).unwrap();
    // resting on top, allowing for the penetration slop
    assert!(falling.position().y() <= 9.1);
    assert!(falling.position().y() > 8.5);
}

#[test]
fn test_distance_constraint_in_world() {
    let mut physics = Physics::new(weightless());
    let a = physics.add_body(circle(0., 0., 0.5, Material::named("rock")));
    let b = physics.add_body(circle(10., 0., 0.5, Material::named("rock")));
    physics
        .add_constraint(Physics::constraint_distance(a, b, 4.))
        .unwrap();

    physics.step(0., 0.1);

    let pa = physics.body(a).unwrap().position();
    let pb = physics.body(b).unwrap().position();
    assert!(((pb - pa).abs() - 4.).abs() < 1e-4);
    assert!((pa.x() - 3.).abs() < 1e-4);
}

#[test]
fn test_variable_field_pushes_toward_origin() {
    let mut physics = Physics::new(weightless());
    physics.add_force_field(ForceField::variable(|position: Point| {
        -position.to_vector()
    }));
    let id = physics.add_body(circle(5., 0., 1., Material::named("metal")));

    physics.step(0., 0.1);

    let velocity = physics.body(id).unwrap().velocity();
    assert!((velocity.x() + 0.5).abs() < 1e-5);
    assert!(physics.total_kinetic_energy() > 0.);
}

#[test]
fn test_deactivated_body_keeps_its_bounds() {
    let mut physics = Physics::default();
    let id = physics.add_body(circle(0., 0., 1., Material::named("rock")));

    physics.step(0., 0.1);
    physics.step(0.1, 0.1);
    physics.body_mut(id).unwrap().deactivate();

    let body = physics.body(id).unwrap();
    let position = body.position();
    let centroid = body.bounds().borrow().centroid();
    assert_eq!(centroid, position);

    for frame in 2..20 {
        physics.step(frame as FloatNum * 0.1, 0.1);
    }

    let body = physics.body(id).unwrap();
    assert_eq!(body.position(), position);
    assert_eq!(body.bounds().borrow().centroid(), centroid);
}

#[test]
fn test_inactive_ground_reports_only_current_contacts() {
    let mut physics = Physics::default();
    let ground = physics.add_body(
        Physics::new_body_named("box", Bounds::new((-10., 10.), (10., 12.)).shared(), "static")
            .unwrap(),
    );
    physics.body_mut(ground).unwrap().deactivate();
    let crate_id = physics.add_body(
        Physics::new_body_named("box", Bounds::new((-1., 7.), (1., 9.)).shared(), "wood")
            .unwrap(),
    );

    for frame in 0..240 {
        physics.step(frame as FloatNum / 60., 1. / 60.);
    }

    let ground = physics.body(ground).unwrap();
    assert_eq!(ground.position(), Point::new(0., 11.));
    assert!(!ground.debug_contacts().is_empty());
    assert!(ground.debug_contacts().len() <= 2);
    assert!(physics.body(crate_id).unwrap().position().y() <= 9.1);
}
