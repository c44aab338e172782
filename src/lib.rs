// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: exercises, muscle groups, equipment, and logged workouts.
//!
//! This crate provides the JSON API backend, the persistence layer behind
//! it, and the client-side list and form state used by the web UI.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schemas;
pub mod services;
pub mod time_utils;
pub mod ui;

use config::Config;
use db::Database;
use repositories::{
    EquipmentRepository, ExerciseRepository, MuscleGroupRepository, PersonalRecordRepository,
    UserRepository, WorkoutRepository,
};
use services::{
    EquipmentService, ExerciseService, MuscleGroupService, PersonalRecordService, UserService,
    WorkoutService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub exercises: ExerciseService,
    pub muscle_groups: MuscleGroupService,
    pub equipment: EquipmentService,
    pub workouts: WorkoutService,
    pub personal_records: PersonalRecordService,
    pub users: UserService,
}

impl AppState {
    /// Wire every service to its repository over `db`.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            exercises: ExerciseService::new(ExerciseRepository::new(db.clone())),
            muscle_groups: MuscleGroupService::new(MuscleGroupRepository::new(db.clone())),
            equipment: EquipmentService::new(EquipmentRepository::new(db.clone())),
            workouts: WorkoutService::new(WorkoutRepository::new(db.clone())),
            personal_records: PersonalRecordService::new(
                PersonalRecordRepository::new(db.clone()),
                WorkoutRepository::new(db.clone()),
            ),
            users: UserService::new(UserRepository::new(db)),
            config,
        }
    }
}
