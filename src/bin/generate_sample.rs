use anyhow::{Context, Result};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Village centres around Chenggong township (lat, lon).
const CLUSTERS: [(f64, f64); 4] = [
    (23.0990, 121.3760),
    (23.1350, 121.3900),
    (23.0520, 121.3450),
    (23.1710, 121.4050),
];

const SURNAMES: [&str; 6] = ["陳", "林", "王", "張", "李", "黃"];
const GIVEN: [&str; 6] = ["淑芬", "志明", "美玲", "建宏", "秀英", "家豪"];
const ELIGIBILITY: [&str; 4] = ["低收入戶", "中低收入戶", "獨居老人", "身心障礙"];
const POSITIONS: [&str; 4] = ["客廳", "臥室", "廚房", "樓梯間"];
const YEARS: [&str; 3] = ["112", "113", "114"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_installations.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    writer.write_record([
        "姓名",
        "國民身分證統一編號",
        "電話",
        "年度",
        "補助資格",
        "裝置位置",
        "裝置數量",
        "緯度",
        "經度",
    ])?;

    let n_rows = 120;
    for i in 0..n_rows {
        let (lat0, lon0) = CLUSTERS[i % CLUSTERS.len()];
        let name = format!("{}{}", rng.pick(&SURNAMES), rng.pick(&GIVEN));
        let id = format!("V{:09}", rng.next_u64() % 1_000_000_000);
        let phone = format!("09{:08}", rng.next_u64() % 100_000_000);
        let units = (1 + rng.next_u64() % 3).to_string();

        // Every 15th row has a coordinate the dashboard must drop.
        let (lat, lon) = if i % 15 == 7 {
            ("N/A".to_string(), format!("{:.6}", lon0))
        } else {
            (
                format!("{:.6}", rng.gauss(lat0, 0.006)),
                format!("{:.6}", rng.gauss(lon0, 0.006)),
            )
        };

        writer.write_record([
            name.as_str(),
            id.as_str(),
            phone.as_str(),
            rng.pick(&YEARS),
            rng.pick(&ELIGIBILITY),
            rng.pick(&POSITIONS),
            units.as_str(),
            lat.as_str(),
            lon.as_str(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} installations to {output_path}");
    Ok(())
}
