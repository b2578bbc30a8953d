use optionable::{Application, Optionable, Verbosity};

#[derive(Optionable)]
struct Summer {
    #[optionable(parent)]
    verbosity: Verbosity,
    #[optionable(short = 'n', long = "count", description = "How many integers to sum.", required)]
    limit: i64,
    #[optionable(description = "Scale the sum by this factor.")]
    factor: f32,
}

impl Default for Summer {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            limit: 0,
            factor: 1.0,
        }
    }
}

impl Application for Summer {
    fn usage() -> String {
        "summer --count N [--factor F] [-v]".to_string()
    }

    fn run(self) {
        let sum: i64 = (1..=self.limit).sum();

        if self.verbosity.is_verbose() {
            println!("Summing 1..={} scaled by {}.", self.limit, self.factor);
        }

        println!("Sum: {}", sum as f32 * self.factor);
    }
}

fn main() {
    Summer::start();
}
