use crystal_field::{CfArg, IonProblem, susceptibility};
use quantum::utility::{linspace, save_data, save_serialize};
use rayon::prelude::*;

pub struct FieldScan;

impl FieldScan {
    pub fn run() {
        let args: Vec<CfArg> = vec![
            "t".into(),
            CfArg::Value(-0.173477508),
            CfArg::Value(0.001084591),
            CfArg::Value(-0.012701252),
            CfArg::Value(-3.34835e-6),
            CfArg::Value(0.0000097),
        ];
        let problem = IonProblem::from_list("Ho", [0., 0., 0.], &args)
            .expect("could not create holmium problem");

        let fields = linspace(0.01, 10., 200);
        let temperature = 10.;

        let results: Vec<(Vec<f64>, f64)> = fields
            .par_iter()
            .map(|&field| {
                let holmium = IonProblem::with_ion(problem.ion().clone(), [0., 0., field], problem.cf_params().clone())
                    .solve()
                    .expect("could not solve holmium problem");
                let chi = susceptibility(&holmium, temperature).expect("could not calculate susceptibility");

                (holmium.energies().to_vec(), chi)
            })
            .collect();

        let mut data = vec![fields.clone()];
        data.push(results.iter().map(|x| x.1).collect());
        for i in 0..problem.ion().j2p1() {
            data.push(results.iter().map(|x| x.0[i]).collect());
        }

        let header = "field [T]\tchi [uB/T]\tenergies [K]";
        save_data("holmium_field_scan", header, &data).expect("error while saving results");

        let last = IonProblem::with_ion(problem.ion().clone(), [0., 0., 10.], problem.cf_params().clone())
            .solve()
            .expect("could not solve holmium problem");
        save_serialize("holmium_10T", &last.level_scheme()).expect("error while saving results");
    }
}
