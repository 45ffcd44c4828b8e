//! Writes a sample `employees.csv` and a small demonstration
//! `model_rf.json.gz` so the app can be exercised end to end.

use appraisal::data::table::FEATURE_COLUMNS;
use appraisal::model::artifact::MODEL_FILENAME;
use appraisal::model::forest::{Node, RatingForest, Tree};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as i64
    }
}

fn write_employees_csv(path: &str, rng: &mut SimpleRng) -> usize {
    let departments = [
        "Data Science",
        "Development",
        "Finance",
        "Human Resources",
        "Research & Development",
        "Sales",
    ];
    let genders = ["Male", "Female"];

    let mut writer = csv::Writer::from_path(path).expect("creating employees.csv");

    // Feature columns plus a few extras the pipeline should ignore.
    let mut header: Vec<&str> = vec!["EmpNumber", "Gender", "Age"];
    header.extend(FEATURE_COLUMNS);
    writer.write_record(&header).expect("writing header");

    let mut rows = 0;
    for (d, dept) in departments.iter().enumerate() {
        for i in 0..8 {
            let years_at_company = rng.range(1, 20);
            let record = vec![
                format!("E{:04}", 1000 + d * 10 + i),
                genders[(rng.next_u64() % 2) as usize].to_string(),
                rng.range(22, 58).to_string(),
                dept.to_string(),
                rng.range(1, 4).to_string(),
                rng.range(11, 25).to_string(),
                rng.range(1, 4).to_string(),
                years_at_company.to_string(),
                rng.range(0, years_at_company.min(12)).to_string(),
                rng.range(0, 7).to_string(),
                rng.range(0, years_at_company.min(15)).to_string(),
            ];
            writer.write_record(&record).expect("writing record");
            rows += 1;
        }
    }
    writer.flush().expect("flushing employees.csv");
    rows
}

/// A hand-built forest over the eight features, classes 2/3/4.
/// Feature indices follow [`FEATURE_COLUMNS`]:
/// 1 = EmpEnvironmentSatisfaction, 2 = EmpLastSalaryHikePercent,
/// 3 = EmpWorkLifeBalance, 6 = YearsSinceLastPromotion.
fn demo_forest() -> RatingForest {
    let split = |feature, threshold, left, right| Node::Split {
        feature,
        threshold,
        left,
        right,
    };
    let leaf = |class| Node::Leaf { class };

    RatingForest {
        feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        classes: vec![2, 3, 4],
        trees: vec![
            Tree {
                nodes: vec![
                    split(1, 2.5, 1, 2),
                    leaf(0),
                    split(2, 17.5, 3, 4),
                    leaf(1),
                    leaf(2),
                ],
            },
            Tree {
                nodes: vec![
                    split(6, 1.5, 1, 2),
                    leaf(2),
                    split(1, 3.5, 3, 4),
                    leaf(1),
                    leaf(2),
                ],
            },
            Tree {
                nodes: vec![split(3, 2.5, 1, 2), leaf(1), leaf(2)],
            },
        ],
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let csv_path = "employees.csv";
    let rows = write_employees_csv(csv_path, &mut rng);

    let forest = demo_forest();
    forest.check().expect("demo forest is well-formed");

    let file = std::fs::File::create(MODEL_FILENAME).expect("creating model artifact");
    let mut gz = GzEncoder::new(file, Compression::default());
    serde_json::to_writer(&mut gz, &forest).expect("serializing forest");
    gz.finish().expect("closing model artifact");

    println!(
        "Wrote {rows} employees to {csv_path} and a {}-tree model to {MODEL_FILENAME}",
        forest.trees.len()
    );
}
