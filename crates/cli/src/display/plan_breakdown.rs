use pod_testing_core::ExecutionPlan;

pub fn print_plan_breakdown(plan: &ExecutionPlan, program: &str) {
    println!("   🔧 Command breakdown:");
    println!("      • command: {}", program);
    println!(
        "      • {}: {}",
        plan.container.kind,
        plan.container.path.display()
    );
    if plan.container.path != plan.project {
        println!("      • project: {}", plan.project.display());
    }
    println!("      • target: {}", plan.target);
    println!("      • scheme: {}", plan.scheme);
    println!("      • sdk: {}", plan.sdk());
    println!("      • destination: {}", plan.destination);
    if !plan.actions.is_empty() {
        println!("      • actions: {:?}", plan.actions);
    }

    println!("   🚀 Final command: {}", plan.to_shell_command(program));
}
