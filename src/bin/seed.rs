// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seed the database with the muscle group catalogue.
//!
//! Usage: `seed [--demo-user <email>]`. With `--demo-user`, also creates a
//! user and prints a session token for it.

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::Database,
    middleware::create_session_token,
    models::muscle_group::{MuscleGroupFilter, NewMuscleGroup},
    models::user::NewUser,
    models::BodyRegion,
    repositories::{MuscleGroupRepository, Repository, UserRepository},
};

const MUSCLE_GROUPS: &[(&str, BodyRegion, &str)] = &[
    // Upper, front
    (
        "Pectoralis Major",
        BodyRegion::Upper,
        "Primary chest muscle responsible for arm adduction, flexion, and internal rotation",
    ),
    (
        "Pectoralis Minor",
        BodyRegion::Upper,
        "Deep chest muscle that aids in shoulder protraction and depression",
    ),
    (
        "Anterior Deltoid",
        BodyRegion::Upper,
        "Front shoulder muscle responsible for arm flexion and internal rotation",
    ),
    (
        "Biceps Brachii",
        BodyRegion::Upper,
        "Upper arm muscle that flexes the elbow and supinates the forearm",
    ),
    // Upper, back
    (
        "Latissimus Dorsi",
        BodyRegion::Upper,
        "Large back muscle responsible for arm extension, adduction, and internal rotation",
    ),
    (
        "Trapezius",
        BodyRegion::Upper,
        "Upper back muscle that moves the shoulder blade and supports the arm",
    ),
    (
        "Posterior Deltoid",
        BodyRegion::Upper,
        "Rear shoulder muscle responsible for arm extension and external rotation",
    ),
    (
        "Triceps Brachii",
        BodyRegion::Upper,
        "Upper arm muscle that extends the elbow",
    ),
    (
        "Rhomboids",
        BodyRegion::Upper,
        "Upper back muscles that retract the shoulder blades",
    ),
    (
        "Rectus Abdominis",
        BodyRegion::Core,
        "Front abdominal muscle responsible for trunk flexion",
    ),
    (
        "Obliques",
        BodyRegion::Core,
        "Side abdominal muscles responsible for rotation and lateral flexion",
    ),
    (
        "Transverse Abdominis",
        BodyRegion::Core,
        "Deep core muscle that stabilizes the spine and compresses the abdomen",
    ),
    (
        "Erector Spinae",
        BodyRegion::Core,
        "Back muscles responsible for spine extension and posture",
    ),
    // Lower, front
    (
        "Quadriceps",
        BodyRegion::Lower,
        "Front thigh muscles responsible for knee extension and hip flexion",
    ),
    (
        "Hip Flexors",
        BodyRegion::Lower,
        "Muscle group that flexes the hip and stabilizes the spine",
    ),
    (
        "Tibialis Anterior",
        BodyRegion::Lower,
        "Front shin muscle responsible for dorsiflexion of the foot",
    ),
    // Lower, back
    (
        "Gluteus Maximus",
        BodyRegion::Lower,
        "Large hip muscle responsible for hip extension and external rotation",
    ),
    (
        "Hamstrings",
        BodyRegion::Lower,
        "Rear thigh muscles responsible for knee flexion and hip extension",
    ),
    (
        "Gastrocnemius",
        BodyRegion::Lower,
        "Main calf muscle responsible for plantar flexion of the foot",
    ),
    (
        "Soleus",
        BodyRegion::Lower,
        "Deep calf muscle responsible for plantar flexion of the foot",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let demo_user = match (args.next().as_deref(), args.next()) {
        (None, _) => None,
        (Some("--demo-user"), Some(email)) => Some(email),
        _ => bail!("usage: seed [--demo-user <email>]"),
    };

    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to open database")?;

    let groups = MuscleGroupRepository::new(db.clone());
    let existing = groups.find_all(&MuscleGroupFilter::default()).await?;
    if existing.is_empty() {
        for (name, body, description) in MUSCLE_GROUPS {
            groups
                .create(NewMuscleGroup {
                    name: name.to_string(),
                    description: description.to_string(),
                    body: *body,
                })
                .await?;
        }
        tracing::info!(count = MUSCLE_GROUPS.len(), "Muscle groups seeded");
    } else {
        tracing::info!(count = existing.len(), "Muscle groups already present, skipping");
    }

    if let Some(email) = demo_user {
        let user = UserRepository::new(db)
            .create(NewUser {
                name: Some("Demo".to_string()),
                email: Some(email),
                email_verified: Some(chrono::Utc::now()),
                image: None,
            })
            .await?;
        let token = create_session_token(&user.id, &config.session_secret)?;
        tracing::info!(user_id = %user.id, "Demo user created");
        println!("{token}");
    }

    Ok(())
}
