//! Backtracking search for conflict-free section combinations.
//!
//! # Algorithm
//!
//! 1. Order courses by section count, fewest first (most-constrained
//!    variable first). The sort is stable, so ties keep request order.
//! 2. Depth-first over courses. Before trying any section of a course,
//!    reject the branch if the course and an already-placed course list
//!    each other as direct prerequisites.
//! 3. For each section of the current course, in catalog order: skip it
//!    if closed, if any of its meetings clashes with a placed meeting
//!    (overlap or insufficient travel gap), or if it meets on an
//!    excluded day. Otherwise place it and recurse.
//! 4. A full assignment is recorded; the search stops globally once
//!    `max_results` schedules exist or the node budget runs out.
//!
//! The search is deterministic: identical inputs give identical output
//! in identical order.
//!
//! # Complexity
//! Worst case O(∏ sᵢ) for sᵢ sections per course. Prerequisite pruning
//! happens once per branch before any section is tried.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::placement::PartialSchedule;
use super::TravelPolicy;
use crate::config::EngineConfig;
use crate::models::{Course, Schedule, ScheduleConstraints, ScheduledSection, Section};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Sections placed on the partial schedule.
    pub nodes_explored: u64,
    /// Branches cut by a same-request prerequisite conflict.
    pub prerequisite_prunes: u64,
    /// The result cap was reached.
    pub cap_reached: bool,
    /// The node budget ran out before the search finished.
    pub truncated: bool,
}

/// Schedules found by one search, with its counters.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport<'a> {
    /// Complete schedules, in enumeration order.
    pub schedules: Vec<Schedule<'a>>,
    /// Search counters.
    pub stats: SearchStats,
}

/// Enumerates feasible schedules for a set of requested courses.
///
/// Each engine owns its [`EngineConfig`]; searches share no state and
/// may run concurrently from different threads.
///
/// # Example
///
/// ```
/// use section_scheduler::models::{Course, DayCode, ScheduleConstraints, Section, TimeSlot};
/// use section_scheduler::scheduler::SchedulingEngine;
///
/// let courses = vec![
///     Course::new("198:111", "Intro CS").with_section(
///         Section::new("01", "10001")
///             .with_slot(TimeSlot::at(DayCode::Monday, (10, 20), (11, 40)).with_campus("BUSCH")),
///     ),
///     Course::new("640:151", "Calculus I").with_section(
///         Section::new("01", "20001")
///             .with_slot(TimeSlot::at(DayCode::Tuesday, (10, 20), (11, 40)).with_campus("LIVINGSTON")),
///     ),
/// ];
///
/// let engine = SchedulingEngine::new();
/// let schedules = engine.generate_schedules(&courses, &ScheduleConstraints::new(), 50);
/// assert_eq!(schedules.len(), 1);
/// assert_eq!(schedules[0].len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchedulingEngine {
    config: EngineConfig,
}

impl SchedulingEngine {
    /// Creates an engine with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given policy.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Sets the default result cap used by [`search`](Self::search).
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Sets the travel policy.
    pub fn with_travel_policy(mut self, travel: TravelPolicy) -> Self {
        self.config.travel = travel;
        self
    }

    /// Sets a budget on section placements.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.config.node_limit = Some(node_limit);
        self
    }

    /// Current policy.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns up to `max_results` feasible schedules.
    ///
    /// Each schedule holds one section per course, ordered by the engine's
    /// internal course order (fewest sections first), not the input order.
    /// An empty result means the request is infeasible. An empty course
    /// list yields a single empty schedule.
    pub fn generate_schedules<'a>(
        &self,
        courses: &'a [Course],
        constraints: &ScheduleConstraints,
        max_results: usize,
    ) -> Vec<Schedule<'a>> {
        self.run(courses, constraints, max_results).schedules
    }

    /// Runs a search with the configured cap and node budget.
    pub fn search<'a>(
        &self,
        courses: &'a [Course],
        constraints: &ScheduleConstraints,
    ) -> SearchReport<'a> {
        self.run(courses, constraints, self.config.max_results)
    }

    fn run<'a>(
        &self,
        courses: &'a [Course],
        constraints: &ScheduleConstraints,
        max_results: usize,
    ) -> SearchReport<'a> {
        let mut order: Vec<&'a Course> = courses.iter().collect();
        order.sort_by_key(|c| c.sections.len());

        debug!(
            courses = order.len(),
            max_results,
            node_limit = ?self.config.node_limit,
            excluded_days = constraints.excluded_days.len(),
            "starting schedule search"
        );

        let mut search = Search {
            course_count: order.len(),
            order,
            constraints,
            travel: &self.config.travel,
            max_results,
            node_limit: self.config.node_limit,
            schedules: Vec::new(),
            stats: SearchStats::default(),
        };

        if max_results > 0 {
            let mut stack = PartialSchedule::with_capacity(search.course_count);
            search.backtrack(&mut stack);
        }

        if search.stats.truncated {
            warn!(
                found = search.schedules.len(),
                nodes = search.stats.nodes_explored,
                "schedule search stopped by node budget"
            );
        }
        debug!(
            found = search.schedules.len(),
            nodes = search.stats.nodes_explored,
            prunes = search.stats.prerequisite_prunes,
            cap_reached = search.stats.cap_reached,
            "schedule search finished"
        );

        SearchReport {
            schedules: search.schedules,
            stats: search.stats,
        }
    }
}

/// State of one search call.
struct Search<'a, 'p> {
    order: Vec<&'a Course>,
    course_count: usize,
    constraints: &'p ScheduleConstraints,
    travel: &'p TravelPolicy,
    max_results: usize,
    node_limit: Option<u64>,
    schedules: Vec<Schedule<'a>>,
    stats: SearchStats,
}

impl<'a> Search<'a, '_> {
    fn backtrack(&mut self, stack: &mut PartialSchedule<'a>) {
        if self.is_finished() {
            return;
        }

        let depth = stack.len();
        if depth == self.course_count {
            self.record(stack);
            return;
        }

        let course = self.order[depth];
        if let Some(placed) = self.order[..depth]
            .iter()
            .copied()
            .find(|placed| placed.conflicts_with(course))
        {
            self.stats.prerequisite_prunes += 1;
            trace!(course = %course.code, placed = %placed.code, "prerequisite conflict, pruning branch");
            return;
        }

        for section in &course.sections {
            if self.is_finished() {
                return;
            }
            if !self.admits(section, stack.sections()) {
                continue;
            }
            if self.node_budget_spent() {
                self.stats.truncated = true;
                return;
            }

            self.stats.nodes_explored += 1;
            let mut placement = stack.place(section);
            self.backtrack(&mut placement);
        }
    }

    /// Per-candidate checks: open, clash-free against placed sections,
    /// and clear of excluded days.
    fn admits(&self, candidate: &Section, placed: &[&Section]) -> bool {
        candidate.is_open
            && placed.iter().all(|existing| self.fits_beside(candidate, existing))
            && self.constraints.permits(candidate)
    }

    fn fits_beside(&self, candidate: &Section, existing: &Section) -> bool {
        candidate.time_slots.iter().all(|a| {
            existing
                .time_slots
                .iter()
                .all(|b| self.travel.compatible(a, b))
        })
    }

    fn record(&mut self, stack: &PartialSchedule<'a>) {
        let entries = self
            .order
            .iter()
            .zip(stack.sections())
            .map(|(&course, &section)| ScheduledSection { course, section })
            .collect();
        self.schedules.push(Schedule { entries });

        if self.schedules.len() >= self.max_results {
            self.stats.cap_reached = true;
        }
    }

    fn is_finished(&self) -> bool {
        self.stats.cap_reached || self.stats.truncated
    }

    fn node_budget_spent(&self) -> bool {
        self.node_limit
            .is_some_and(|limit| self.stats.nodes_explored >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayCode, TimeSlot};
    use crate::validation::audit_schedule;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn section(index: &str, day: DayCode, start: (u16, u16), end: (u16, u16), campus: &str) -> Section {
        Section::new("01", index).with_slot(TimeSlot::at(day, start, end).with_campus(campus))
    }

    fn indices(schedule: &Schedule) -> Vec<String> {
        schedule.sections().map(|s| s.index.clone()).collect()
    }

    #[test]
    fn test_two_compatible_courses() {
        let courses = vec![
            Course::new("198:111", "Intro CS")
                .with_section(section("A1", DayCode::Monday, (10, 0), (10, 50), "BUSCH")),
            Course::new("640:151", "Calc I")
                .with_section(section("B1", DayCode::Wednesday, (10, 0), (10, 50), "BUSCH")),
        ];
        let engine = SchedulingEngine::new();
        let schedules = engine.generate_schedules(&courses, &ScheduleConstraints::new(), 50);

        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].len(), 2);
        assert_eq!(schedules[0].section_for("198:111").unwrap().index, "A1");
        assert_eq!(schedules[0].section_for("640:151").unwrap().index, "B1");
    }

    #[test]
    fn test_prerequisite_pair_is_infeasible() {
        let courses = vec![
            Course::new("198:112", "Data Structures")
                .with_prereq("198:111")
                .with_section(section("A1", DayCode::Monday, (10, 0), (10, 50), "BUSCH")),
            Course::new("198:111", "Intro CS")
                .with_section(section("B1", DayCode::Tuesday, (10, 0), (10, 50), "BUSCH")),
        ];
        let report = SchedulingEngine::new().search(&courses, &ScheduleConstraints::new());

        assert!(report.schedules.is_empty());
        assert_eq!(report.stats.prerequisite_prunes, 1);
        // the conflict is caught before any section of the second course is tried
        assert_eq!(report.stats.nodes_explored, 1);
    }

    #[test]
    fn test_prerequisite_check_is_pairwise_only() {
        // A requires B, B requires C; requesting A and C together is fine
        let courses = vec![
            Course::new("A:1", "A")
                .with_prereq("B:1")
                .with_section(section("A1", DayCode::Monday, (9, 0), (9, 50), "BUSCH")),
            Course::new("C:1", "C")
                .with_section(section("C1", DayCode::Tuesday, (9, 0), (9, 50), "BUSCH")),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 10);
        assert_eq!(schedules.len(), 1);
    }

    #[test]
    fn test_travel_buffer_between_adjacent_campuses() {
        let a = Course::new("A:1", "A")
            .with_section(section("A1", DayCode::Monday, (10, 0), (10, 50), "BUSCH"));
        let too_close = vec![
            a.clone(),
            Course::new("B:1", "B")
                .with_section(section("B1", DayCode::Monday, (11, 0), (11, 50), "LIVINGSTON")),
        ];
        let far_enough = vec![
            a,
            Course::new("B:1", "B")
                .with_section(section("B1", DayCode::Monday, (11, 35), (12, 25), "LIVINGSTON")),
        ];

        let engine = SchedulingEngine::new();
        let none = ScheduleConstraints::new();
        assert!(engine.generate_schedules(&too_close, &none, 50).is_empty());
        assert_eq!(engine.generate_schedules(&far_enough, &none, 50).len(), 1);
    }

    #[test]
    fn test_virtual_and_same_campus_skip_travel() {
        let courses = vec![
            Course::new("A:1", "A")
                .with_section(section("A1", DayCode::Monday, (10, 0), (10, 50), "BUSCH")),
            Course::new("B:1", "B")
                .with_section(section("B1", DayCode::Monday, (10, 50), (11, 40), "BUSCH")),
            Course::new("C:1", "C")
                .with_section(section("C1", DayCode::Monday, (11, 45), (12, 30), "ONLINE")),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert_eq!(schedules.len(), 1);
    }

    #[test]
    fn test_excluded_day_blocks_only_section() {
        let courses = vec![Course::new("A:1", "A")
            .with_section(section("A1", DayCode::Friday, (9, 0), (9, 50), "BUSCH"))];
        let constraints = ScheduleConstraints::from_tokens(["F"]);
        let schedules = SchedulingEngine::new().generate_schedules(&courses, &constraints, 50);
        assert!(schedules.is_empty());
    }

    #[test]
    fn test_excluded_day_picks_alternative() {
        let courses = vec![Course::new("A:1", "A")
            .with_section(section("A1", DayCode::Friday, (9, 0), (9, 50), "BUSCH"))
            .with_section(section("A2", DayCode::Thursday, (9, 0), (9, 50), "BUSCH"))];
        let constraints = ScheduleConstraints::from_tokens(["friday"]);
        let schedules = SchedulingEngine::new().generate_schedules(&courses, &constraints, 50);
        assert_eq!(schedules.len(), 1);
        assert_eq!(indices(&schedules[0]), vec!["A2"]);
    }

    #[test]
    fn test_closed_sections_skipped() {
        let courses = vec![Course::new("A:1", "A")
            .with_section(section("A1", DayCode::Monday, (9, 0), (9, 50), "BUSCH").closed())
            .with_section(section("A2", DayCode::Monday, (11, 0), (11, 50), "BUSCH"))];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert_eq!(schedules.len(), 1);
        assert_eq!(indices(&schedules[0]), vec!["A2"]);
    }

    #[test]
    fn test_overlap_rejected() {
        let courses = vec![
            Course::new("A:1", "A")
                .with_section(section("A1", DayCode::Monday, (10, 0), (11, 20), "BUSCH")),
            Course::new("B:1", "B")
                .with_section(section("B1", DayCode::Monday, (11, 0), (12, 20), "BUSCH"))
                .with_section(section("B2", DayCode::Monday, (11, 20), (12, 40), "BUSCH")),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].section_for("B:1").unwrap().index, "B2");
    }

    fn three_by_two_by_four() -> Vec<Course> {
        let mut a = Course::new("A:1", "A");
        for i in 0..3 {
            a = a.with_section(section(&format!("A{i}"), DayCode::Monday, (9 + i, 0), (9 + i, 50), "BUSCH"));
        }
        let mut b = Course::new("B:1", "B");
        for i in 0..2 {
            b = b.with_section(section(&format!("B{i}"), DayCode::Tuesday, (9 + i, 0), (9 + i, 50), "BUSCH"));
        }
        let mut c = Course::new("C:1", "C");
        for i in 0..4 {
            c = c.with_section(section(&format!("C{i}"), DayCode::Wednesday, (9 + i, 0), (9 + i, 50), "BUSCH"));
        }
        vec![a, b, c]
    }

    #[test]
    fn test_cap_and_enumeration_order() {
        let courses = three_by_two_by_four();
        let engine = SchedulingEngine::new();
        let schedules = engine.generate_schedules(&courses, &ScheduleConstraints::new(), 5);

        assert_eq!(schedules.len(), 5);
        // fewest sections first: B (2), A (3), C (4)
        assert_eq!(schedules[0].course_codes(), vec!["B:1", "A:1", "C:1"]);
        let got: Vec<Vec<String>> = schedules.iter().map(indices).collect();
        assert_eq!(
            got,
            vec![
                vec!["B0", "A0", "C0"],
                vec!["B0", "A0", "C1"],
                vec!["B0", "A0", "C2"],
                vec!["B0", "A0", "C3"],
                vec!["B0", "A1", "C0"],
            ]
        );

        let all = engine.generate_schedules(&courses, &ScheduleConstraints::new(), 100);
        assert_eq!(all.len(), 24);
    }

    #[test]
    fn test_search_uses_configured_cap() {
        let courses = three_by_two_by_four();
        let report = SchedulingEngine::new()
            .with_max_results(7)
            .search(&courses, &ScheduleConstraints::new());
        assert_eq!(report.schedules.len(), 7);
        assert!(report.stats.cap_reached);
        assert!(!report.stats.truncated);
    }

    #[test]
    fn test_zero_cap() {
        let courses = three_by_two_by_four();
        let report = SchedulingEngine::new()
            .with_max_results(0)
            .search(&courses, &ScheduleConstraints::new());
        assert!(report.schedules.is_empty());
        assert_eq!(report.stats.nodes_explored, 0);
    }

    #[test]
    fn test_node_limit_truncates() {
        let courses = three_by_two_by_four();
        let report = SchedulingEngine::new()
            .with_node_limit(4)
            .search(&courses, &ScheduleConstraints::new());
        assert!(report.stats.truncated);
        assert_eq!(report.stats.nodes_explored, 4);
        // B0, A0, C0 (complete), C1 (complete)
        assert_eq!(report.schedules.len(), 2);
    }

    #[test]
    fn test_empty_request() {
        let schedules =
            SchedulingEngine::new().generate_schedules(&[], &ScheduleConstraints::new(), 50);
        assert_eq!(schedules.len(), 1);
        assert!(schedules[0].is_empty());
    }

    #[test]
    fn test_course_without_sections_is_infeasible() {
        let courses = vec![
            Course::new("A:1", "A"),
            Course::new("B:1", "B")
                .with_section(section("B1", DayCode::Monday, (9, 0), (9, 50), "BUSCH")),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert!(schedules.is_empty());
    }

    #[test]
    fn test_sections_without_meetings_fit_anywhere() {
        let courses = vec![
            Course::new("A:1", "A").with_section(Section::new("90", "ONLINE1")),
            Course::new("B:1", "B")
                .with_section(section("B1", DayCode::Monday, (9, 0), (9, 50), "BUSCH")),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert_eq!(schedules.len(), 1);
    }

    #[test]
    fn test_zero_length_meeting_inside_other_does_not_fit() {
        let courses = vec![
            Course::new("A:1", "A").with_section(
                Section::new("01", "A1")
                    .with_slot(TimeSlot::new(DayCode::Monday, 600, 600).with_campus("BUSCH")),
            ),
            Course::new("B:1", "B").with_section(
                Section::new("01", "B1")
                    .with_slot(TimeSlot::new(DayCode::Monday, 500, 700).with_campus("LIVINGSTON")),
            ),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert!(schedules.is_empty());
    }

    #[test]
    fn test_stable_ordering_on_ties() {
        let courses = vec![
            Course::new("Z:1", "Z")
                .with_section(section("Z1", DayCode::Monday, (9, 0), (9, 50), "BUSCH")),
            Course::new("A:1", "A")
                .with_section(section("A1", DayCode::Tuesday, (9, 0), (9, 50), "BUSCH")),
        ];
        let schedules =
            SchedulingEngine::new().generate_schedules(&courses, &ScheduleConstraints::new(), 50);
        assert_eq!(schedules[0].course_codes(), vec!["Z:1", "A:1"]);
    }

    // ---- randomized invariants ----

    const CAMPUSES: [&str; 4] = ["BUSCH", "LIVINGSTON", "COLLEGE AVENUE", "ONLINE"];

    fn random_courses(rng: &mut StdRng) -> Vec<Course> {
        let course_count = rng.random_range(1..=4);
        let mut courses = Vec::with_capacity(course_count);
        for c in 0..course_count {
            let mut course = Course::new(format!("{:03}:{:03}", 100 + c, c), format!("Course {c}"));
            for s in 0..rng.random_range(1..=4) {
                let mut sec = Section::new(format!("{s:02}"), format!("{c}-{s}"));
                for _ in 0..rng.random_range(0..=2) {
                    let day = DayCode::ALL[rng.random_range(0..5)];
                    let start = rng.random_range(8 * 60..18 * 60) / 5 * 5;
                    let length = [50, 80, 180][rng.random_range(0..3)];
                    let campus = CAMPUSES[rng.random_range(0..CAMPUSES.len())];
                    sec = sec.with_slot(TimeSlot::new(day, start, start + length).with_campus(campus));
                }
                if rng.random_bool(0.1) {
                    sec = sec.closed();
                }
                course = course.with_section(sec);
            }
            courses.push(course);
        }
        if course_count > 1 && rng.random_bool(0.2) {
            let prereq = courses[0].code.clone();
            courses[1].prereqs.insert(prereq);
        }
        courses
    }

    /// Counts feasible assignments by exhaustive product, ignoring order.
    fn brute_force_count(courses: &[Course], constraints: &ScheduleConstraints, travel: &TravelPolicy) -> usize {
        for (i, a) in courses.iter().enumerate() {
            if courses[i + 1..].iter().any(|b| a.conflicts_with(b)) {
                return 0;
            }
        }

        let mut count = 0;
        let mut idx = vec![0usize; courses.len()];
        if courses.iter().any(|c| c.sections.is_empty()) {
            return 0;
        }
        loop {
            let picked: Vec<&Section> = idx.iter().zip(courses).map(|(&i, c)| &c.sections[i]).collect();
            let ok = picked.iter().all(|s| s.is_open && constraints.permits(s))
                && picked.iter().enumerate().all(|(i, a)| {
                    picked[i + 1..].iter().all(|b| {
                        a.time_slots
                            .iter()
                            .all(|x| b.time_slots.iter().all(|y| travel.compatible(x, y)))
                    })
                });
            if ok {
                count += 1;
            }

            let mut pos = 0;
            loop {
                if pos == idx.len() {
                    return count;
                }
                idx[pos] += 1;
                if idx[pos] < courses[pos].sections.len() {
                    break;
                }
                idx[pos] = 0;
                pos += 1;
            }
        }
    }

    #[test]
    fn test_random_instances_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let travel = TravelPolicy::default();
        let engine = SchedulingEngine::new();

        for _ in 0..200 {
            let courses = random_courses(&mut rng);
            let constraints = if rng.random_bool(0.3) {
                ScheduleConstraints::new().with_excluded_day(DayCode::ALL[rng.random_range(0..5)])
            } else {
                ScheduleConstraints::new()
            };

            let schedules = engine.generate_schedules(&courses, &constraints, 1_000);
            for schedule in &schedules {
                assert_eq!(schedule.len(), courses.len());
                let violations = audit_schedule(schedule, &constraints, &travel);
                assert!(violations.is_empty(), "violations: {violations:?}");
            }

            // the search finds exactly the feasible combinations
            assert_eq!(schedules.len(), brute_force_count(&courses, &constraints, &travel));

            // deterministic
            let again = engine.generate_schedules(&courses, &constraints, 1_000);
            assert_eq!(schedules, again);

            // the cap truncates a prefix of the full enumeration
            let capped = engine.generate_schedules(&courses, &constraints, 3);
            assert_eq!(capped.len(), schedules.len().min(3));
            assert_eq!(&capped[..], &schedules[..capped.len()]);
        }
    }
}
