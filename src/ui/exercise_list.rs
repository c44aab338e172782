// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise list view state.
//!
//! A plain reducer: the view dispatches actions and re-queries
//! `/api/exercises` whenever [`ExerciseListState::reduce`] says the filters
//! moved. There is no caching or request deduplication.

use crate::models::{BodyRegion, Difficulty, Exercise, ExerciseType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Select-box filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilters {
    pub exercise_type: Option<ExerciseType>,
    pub difficulty: Option<Difficulty>,
    pub body: Option<BodyRegion>,
}

/// One select-box change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Type(Option<ExerciseType>),
    Difficulty(Option<Difficulty>),
    Body(Option<BodyRegion>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseListAction {
    SetFilter(FilterChange),
    SetSearch(String),
    SetView(ViewMode),
    SetLoading(bool),
    SetError(Option<String>),
    SetExercises(Vec<Exercise>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseListState {
    pub exercises: Vec<Exercise>,
    pub filters: ExerciseFilters,
    pub search_query: String,
    pub view: ViewMode,
    pub loading: bool,
    pub error: Option<String>,
}

impl ExerciseListState {
    /// Apply an action. Returns true exactly when the filters or the search
    /// text changed, i.e. when the list must be fetched again.
    pub fn reduce(&mut self, action: ExerciseListAction) -> bool {
        match action {
            ExerciseListAction::SetFilter(change) => {
                let before = self.filters.clone();
                match change {
                    FilterChange::Type(v) => self.filters.exercise_type = v,
                    FilterChange::Difficulty(v) => self.filters.difficulty = v,
                    FilterChange::Body(v) => self.filters.body = v,
                }
                self.filters != before
            }
            ExerciseListAction::SetSearch(query) => {
                let changed = self.search_query != query;
                self.search_query = query;
                changed
            }
            ExerciseListAction::SetView(view) => {
                self.view = view;
                false
            }
            ExerciseListAction::SetLoading(loading) => {
                self.loading = loading;
                false
            }
            ExerciseListAction::SetError(error) => {
                self.error = error;
                false
            }
            ExerciseListAction::SetExercises(exercises) => {
                self.exercises = exercises;
                false
            }
        }
    }

    /// Query string for the current filters, without the leading `?`.
    pub fn query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(t) = self.filters.exercise_type {
            params.push(("type", t.as_str().to_string()));
        }
        if let Some(d) = self.filters.difficulty {
            params.push(("difficulty", d.as_str().to_string()));
        }
        if let Some(b) = self.filters.body {
            params.push(("body", b.as_str().to_string()));
        }
        if !self.search_query.is_empty() {
            params.push(("search", self.search_query.clone()));
        }

        params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path to fetch for the current filters.
    pub fn request_path(&self) -> String {
        match self.query_string() {
            q if q.is_empty() => "/api/exercises".to_string(),
            q => format!("/api/exercises?{q}"),
        }
    }
}
