//! Minimum-cost rectangular assignment (Hungarian algorithm).
//!
//! The solver uses the shortest augmenting path formulation with row and
//! column potentials, adding one row at a time. It requires at least as
//! many columns as rows, so taller matrices are solved transposed and the
//! result is mapped back.
//!
//! Ties are broken deterministically: columns are always scanned in
//! ascending order and a candidate is only replaced by a strictly smaller
//! reduced cost, so ties go to the lowest column. A taller matrix is solved
//! transposed, where the scan runs over rows, so there ties go to the
//! lowest row instead.

use crate::matching::cost::CostMatrix;

/// Column assigned to each row, if any
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    columns: Vec<Option<usize>>,
}

impl Assignment {
    #[must_use]
    pub fn column_for(&self, row: usize) -> Option<usize> {
        self.columns.get(row).copied().flatten()
    }

    /// `(row, column)` pairs in row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|col| (row, col)))
    }

    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    /// Sum of the costs of the assigned cells
    #[must_use]
    pub fn total_cost(&self, costs: &CostMatrix) -> f64 {
        self.pairs().map(|(r, c)| costs.get(r, c)).sum()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.columns
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Solve the assignment problem for `costs`.
///
/// Exactly `min(rows, cols)` rows are assigned, no column is used twice,
/// and the total cost is minimal. Identical input gives identical output.
#[must_use]
pub fn solve(costs: &CostMatrix) -> Assignment {
    let (rows, cols) = (costs.rows(), costs.cols());

    if rows == 0 {
        return Assignment::default();
    }
    if cols == 0 {
        return Assignment {
            columns: vec![None; rows],
        };
    }

    if rows <= cols {
        return Assignment {
            columns: solve_wide(costs),
        };
    }

    // More rows than columns: assign every column to a row instead
    let transposed = costs.transpose();
    let mut columns = vec![None; rows];
    for (col, row) in solve_wide(&transposed).into_iter().enumerate() {
        if let Some(row) = row {
            columns[row] = Some(col);
        }
    }
    Assignment { columns }
}

/// Hungarian algorithm for `rows <= cols`; every row is assigned.
///
/// Internally 1-indexed, with index 0 of `owner` as the virtual column the
/// row being inserted starts from.
fn solve_wide(costs: &CostMatrix) -> Vec<Option<usize>> {
    let (n, m) = (costs.rows(), costs.cols());
    debug_assert!(n <= m);

    let mut row_potential = vec![0.0_f64; n + 1];
    let mut col_potential = vec![0.0_f64; m + 1];
    // Row owning each column; 0 is unowned
    let mut owner = vec![0_usize; m + 1];
    // Previous column on the shortest path to each column
    let mut way = vec![0_usize; m + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut current = 0;
        let mut min_reduced = vec![f64::INFINITY; m + 1];
        let mut visited = vec![false; m + 1];

        // Grow the shortest path tree until it reaches an unowned column
        loop {
            visited[current] = true;
            let r = owner[current];
            let mut delta = f64::INFINITY;
            let mut next = 0;

            for col in 1..=m {
                if visited[col] {
                    continue;
                }
                let reduced =
                    costs.get(r - 1, col - 1) - row_potential[r] - col_potential[col];
                if reduced < min_reduced[col] {
                    min_reduced[col] = reduced;
                    way[col] = current;
                }
                if min_reduced[col] < delta {
                    delta = min_reduced[col];
                    next = col;
                }
            }

            for col in 0..=m {
                if visited[col] {
                    row_potential[owner[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    min_reduced[col] -= delta;
                }
            }

            current = next;
            if owner[current] == 0 {
                break;
            }
        }

        // Flip the augmenting path
        while current != 0 {
            let previous = way[current];
            owner[current] = owner[previous];
            current = previous;
        }
    }

    let mut columns = vec![None; n];
    for col in 1..=m {
        if owner[col] != 0 {
            columns[owner[col] - 1] = Some(col - 1);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn matrix(rows: &[&[f64]]) -> CostMatrix {
        CostMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    /// Exhaustive minimum over every injective assignment of the smaller side
    fn brute_force_min(costs: &CostMatrix) -> f64 {
        fn search(costs: &CostMatrix, row: usize, used: &mut Vec<bool>) -> f64 {
            if row == costs.rows() {
                return 0.0;
            }
            let mut best = f64::INFINITY;
            for col in 0..costs.cols() {
                if used[col] {
                    continue;
                }
                used[col] = true;
                let total = costs.get(row, col) + search(costs, row + 1, used);
                used[col] = false;
                best = best.min(total);
            }
            best
        }

        let costs = if costs.rows() > costs.cols() {
            costs.transpose()
        } else {
            costs.clone()
        };
        search(&costs, 0, &mut vec![false; costs.cols()])
    }

    fn assert_feasible(assignment: &Assignment, costs: &CostMatrix) {
        assert_eq!(assignment.len(), costs.rows());
        assert_eq!(
            assignment.assigned_count(),
            costs.rows().min(costs.cols())
        );
        let mut seen = vec![false; costs.cols()];
        for (_, col) in assignment.pairs() {
            assert!(!seen[col], "column {col} assigned twice");
            seen[col] = true;
        }
    }

    #[test]
    fn test_square_identity_preference() {
        let costs = matrix(&[&[1.0, 3.0, 3.0], &[3.0, 1.0, 3.0], &[3.0, 3.0, 1.0]]);
        let a = solve(&costs);
        assert_eq!(a.as_slice(), &[Some(0), Some(1), Some(2)]);
        assert!((a.total_cost(&costs) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_is_not_optimal() {
        // Greedy row 0 -> col 0 forces row 1 -> col 1 for a total of 101
        let costs = matrix(&[&[1.0, 2.0], &[2.0, 100.0]]);
        let a = solve(&costs);
        assert_eq!(a.as_slice(), &[Some(1), Some(0)]);
        assert!((a.total_cost(&costs) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_wide_matrix_leaves_columns_unused() {
        let costs = matrix(&[&[5.0, 1.0, 9.0], &[1.0, 5.0, 9.0]]);
        let a = solve(&costs);
        assert_eq!(a.as_slice(), &[Some(1), Some(0)]);
    }

    #[test]
    fn test_tall_matrix_leaves_rows_unassigned() {
        let costs = matrix(&[&[5.0, 1.0], &[9.0, 9.0], &[1.0, 5.0]]);
        let a = solve(&costs);
        assert_eq!(a.as_slice(), &[Some(1), None, Some(0)]);
        assert_eq!(a.assigned_count(), 2);
        assert_eq!(a.column_for(1), None);
    }

    #[test]
    fn test_ties_prefer_lowest_column() {
        let costs = matrix(&[&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]]);
        let a = solve(&costs);
        assert_feasible(&a, &costs);
        assert_eq!(solve(&costs), a);

        let single = matrix(&[&[2.0, 2.0, 2.0]]);
        assert_eq!(solve(&single).as_slice(), &[Some(0)]);
    }

    #[test]
    fn test_tall_ties_prefer_lowest_row() {
        let costs = matrix(&[&[1.0], &[1.0], &[1.0]]);
        assert_eq!(solve(&costs).as_slice(), &[Some(0), None, None]);

        let costs = matrix(&[&[4.0, 4.0], &[4.0, 4.0], &[4.0, 4.0]]);
        let a = solve(&costs);
        assert_feasible(&a, &costs);
        assert_eq!(a.column_for(2), None);
    }

    #[test]
    fn test_degenerate_shapes() {
        let empty = CostMatrix::from_rows(Vec::new()).unwrap();
        assert!(solve(&empty).is_empty());

        let no_columns = CostMatrix::from_rows(vec![Vec::new(), Vec::new()]).unwrap();
        let a = solve(&no_columns);
        assert_eq!(a.as_slice(), &[None, None]);
        assert_eq!(a.assigned_count(), 0);
    }

    #[test]
    fn test_matches_brute_force_on_random_matrices() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);

        for _ in 0..300 {
            let rows = rng.gen_range(1..=6);
            let cols = rng.gen_range(1..=6);
            let data: Vec<Vec<f64>> = (0..rows)
                .map(|_| (0..cols).map(|_| rng.gen_range(1.0..20.0)).collect())
                .collect();
            let costs = CostMatrix::from_rows(data).unwrap();

            let a = solve(&costs);
            assert_feasible(&a, &costs);

            let expected = brute_force_min(&costs);
            let actual = a.total_cost(&costs);
            assert!(
                (actual - expected).abs() < 1e-9,
                "{rows}x{cols}: solver {actual}, brute force {expected}"
            );
        }
    }

    #[test]
    fn test_integer_costs_with_ties_are_optimal() {
        // Small integer ranges produce many ties
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let rows = rng.gen_range(1..=5);
            let cols = rng.gen_range(1..=5);
            let data: Vec<Vec<f64>> = (0..rows)
                .map(|_| (0..cols).map(|_| f64::from(rng.gen_range(1..4_u32))).collect())
                .collect();
            let costs = CostMatrix::from_rows(data).unwrap();

            let a = solve(&costs);
            assert_feasible(&a, &costs);
            assert!((a.total_cost(&costs) - brute_force_min(&costs)).abs() < 1e-9);
            assert_eq!(solve(&costs), a);
        }
    }
}
