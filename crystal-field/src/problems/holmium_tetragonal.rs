use crystal_field::{CfArg, IonProblem, susceptibility_curve};

pub struct HolmiumTetragonal;

impl HolmiumTetragonal {
    pub fn run() {
        let args: Vec<CfArg> = vec![
            "t".into(),
            CfArg::Value(-0.173477508),
            CfArg::Value(0.001084591),
            CfArg::Value(-0.012701252),
            CfArg::Value(-3.34835e-6),
            CfArg::Value(0.0000097),
        ];

        let problem = IonProblem::from_list("Ho", [1., 0., 0.], &args)
            .expect("could not create holmium problem");
        println!("{}", problem.ion());
        println!();
        print!("{}", problem.cf_params());
        println!();

        let holmium = problem.solve().expect("could not solve holmium problem");
        println!("{holmium}");

        println!("Calculation of susceptibility");
        let temperatures = [5., 10., 50., 100., 300.];
        let chi = susceptibility_curve(&holmium, &temperatures)
            .expect("could not calculate susceptibility");

        for (t, chi) in temperatures.iter().zip(chi) {
            println!("T = {t} K \tchi_CF = {chi} uB/T");
        }
    }
}
